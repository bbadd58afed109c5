use std::sync::Arc;

use rtrb::Consumer;

use crate::graph::node::{GraphNode, RenderCtx};

/// Transport commands for a `LoopPlayer`, sent from the control thread.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayerMessage {
    Play,
    Pause,
    Rewind,
    SetLooping(bool),
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<PlayerMessage>;
}

impl MessageReceiver for Consumer<PlayerMessage> {
    fn pop(&mut self) -> Option<PlayerMessage> {
        Consumer::pop(self).ok()
    }
}

/// Plays an in-memory mono buffer, looping by default.
///
/// Starts paused. Decoding the buffer is the caller's job.
pub struct LoopPlayer<R = Consumer<PlayerMessage>> {
    buffer: Arc<[f32]>,
    position: usize,
    playing: bool,
    looping: bool,
    rx: R,
}

impl<R: MessageReceiver> LoopPlayer<R> {
    pub fn new(buffer: Arc<[f32]>, rx: R) -> Self {
        Self {
            buffer,
            position: 0,
            playing: false,
            looping: true,
            rx,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> usize {
        self.position
    }

    fn handle_messages(&mut self) {
        while let Some(msg) = self.rx.pop() {
            match msg {
                PlayerMessage::Play => self.playing = true,
                PlayerMessage::Pause => self.playing = false,
                PlayerMessage::Rewind => self.position = 0,
                PlayerMessage::SetLooping(looping) => self.looping = looping,
            }
        }
    }
}

impl<R: MessageReceiver + Send> GraphNode for LoopPlayer<R> {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        self.handle_messages();

        let len = self.buffer.len();
        let mut written = 0;

        while self.playing && written < out.len() && len > 0 {
            if self.position >= len {
                if self.looping {
                    self.position = 0;
                } else {
                    self.playing = false;
                    self.position = 0;
                    break;
                }
            }

            let n = (len - self.position).min(out.len() - written);
            out[written..written + n]
                .copy_from_slice(&self.buffer[self.position..self.position + n]);
            self.position += n;
            written += n;
        }

        out[written..].fill(0.0);
    }

    fn reset(&mut self) {
        self.position = 0;
    }
}
