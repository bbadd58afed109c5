use std::sync::Arc;

use rtrb::{Producer, RingBuffer};
use tracing::{debug, info, warn};

use crate::{
    conductor::{
        snapshot::{EffectSnapshot, SnapshotParam},
        Conductor, ConductorError, ConductorState,
    },
    engine::AudioBackend,
    graph::{
        drywet::BalanceControl,
        effect::RampedEffect,
        extensions::NodeExt,
        node::GraphNode,
        params::ParamBank,
        player::{LoopPlayer, PlayerMessage},
    },
};

const TRANSPORT_CAPACITY: usize = 32;

/// Runs a looping source through one effect and a dry/wet mixer.
///
/// Parameter and balance handles outlive any single graph: every `start`
/// builds a new graph wired to the same handles, so a restart resumes from
/// the values the previous graph last published.
pub struct EffectConductor<S: EffectSnapshot> {
    data: S,
    params: ParamBank<SnapshotParam<S>>,
    balance: BalanceControl,
    source: Arc<[f32]>,
    backend: Box<dyn AudioBackend>,
    transport: Option<Producer<PlayerMessage>>,
    state: ConductorState,
}

impl<S: EffectSnapshot> EffectConductor<S> {
    /// `initial` is applied without ramps.
    pub fn new(initial: S, source: Arc<[f32]>, backend: Box<dyn AudioBackend>) -> Self {
        let params = ParamBank::new();
        for (param, value) in initial.params() {
            params.jump_to(param, value);
        }
        let balance = BalanceControl::new(initial.balance());

        Self {
            data: initial,
            params,
            balance,
            source,
            backend,
            transport: None,
            state: ConductorState::Stopped,
        }
    }

    /// Apply an edit. Every ramped field glides to its new value over the
    /// snapshot's ramp duration; the balance changes on the next block.
    ///
    /// Wait-free, callable whether or not the graph is running.
    pub fn on_snapshot_changed(&mut self, snapshot: S) {
        post_targets(&self.params, &snapshot);
        self.balance.set(snapshot.balance());

        debug!(?snapshot, "snapshot applied");
        self.data = snapshot;
    }

    /// The snapshot most recently applied.
    pub fn data(&self) -> &S {
        &self.data
    }

    pub fn params(&self) -> &ParamBank<SnapshotParam<S>> {
        &self.params
    }

    pub fn balance(&self) -> &BalanceControl {
        &self.balance
    }

    pub fn play(&mut self) -> Result<(), ConductorError> {
        self.send(PlayerMessage::Play)
    }

    pub fn pause(&mut self) -> Result<(), ConductorError> {
        self.send(PlayerMessage::Pause)
    }

    pub fn rewind(&mut self) -> Result<(), ConductorError> {
        self.send(PlayerMessage::Rewind)
    }

    pub fn set_looping(&mut self, looping: bool) -> Result<(), ConductorError> {
        self.send(PlayerMessage::SetLooping(looping))
    }

    fn send(&mut self, message: PlayerMessage) -> Result<(), ConductorError> {
        if self.state != ConductorState::Running {
            return Err(ConductorError::NotRunning);
        }
        let transport = self.transport.as_mut().ok_or(ConductorError::NotRunning)?;
        transport
            .push(message)
            .map_err(|_| ConductorError::TransportFull)
    }
}

impl<S: EffectSnapshot> EffectConductor<S> {
    /// Player → dry/wet(effect) wired to this conductor's handles, plus the
    /// sending end of the player's transport ring.
    fn build_graph(&self) -> (Box<dyn GraphNode>, Producer<PlayerMessage>) {
        let (tx, rx) = RingBuffer::new(TRANSPORT_CAPACITY);

        let player = LoopPlayer::new(Arc::clone(&self.source), rx);
        let effect = RampedEffect::new(
            S::Effect::default(),
            self.params.clone(),
            self.backend.sample_rate(),
        );

        (Box::new(player.dry_wet(effect, self.balance.clone())), tx)
    }
}

fn post_targets<S: EffectSnapshot>(params: &ParamBank<SnapshotParam<S>>, snapshot: &S) {
    let duration = snapshot.ramp_duration();
    for (param, value) in snapshot.params() {
        params.set_target(param, value, duration);
    }
}

impl<S: EffectSnapshot> Conductor for EffectConductor<S> {
    fn start(&mut self) -> Result<(), ConductorError> {
        if self.state == ConductorState::Running {
            warn!("start requested while already running");
            return Err(ConductorError::AlreadyRunning);
        }

        // A graph stopped mid-ramp left its target unread; post it again so
        // the new graph carries on toward the latest snapshot.
        post_targets(&self.params, &self.data);

        let (graph, transport) = self.build_graph();
        if let Err(err) = self.backend.start(graph) {
            warn!(%err, "backend failed to start");
            return Err(err.into());
        }

        self.transport = Some(transport);
        self.state = ConductorState::Running;
        // The player stays silent until the backend is pulling blocks
        self.send(PlayerMessage::Play)?;

        info!(
            sample_rate = self.backend.sample_rate(),
            source_frames = self.source.len(),
            "conductor started"
        );
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ConductorError> {
        if self.state != ConductorState::Running {
            warn!("stop requested while not running");
            return Err(ConductorError::NotRunning);
        }

        self.backend.stop();
        self.transport = None;
        self.state = ConductorState::Stopped;

        info!("conductor stopped");
        Ok(())
    }

    /// A detached copy of the graph, already playing.
    ///
    /// It shares parameters and balance with the conductor, but transport
    /// calls keep going to the graph the backend is rendering.
    fn output_node(&self) -> Box<dyn GraphNode> {
        let (graph, mut transport) = self.build_graph();
        // Fresh ring, cannot be full
        let _ = transport.push(PlayerMessage::Play);
        graph
    }

    fn state(&self) -> ConductorState {
        self.state
    }
}

impl<S: EffectSnapshot> Drop for EffectConductor<S> {
    fn drop(&mut self) {
        if self.state == ConductorState::Running {
            self.backend.stop();
        }
    }
}
