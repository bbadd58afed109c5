use crate::graph::{
    drywet::{BalanceControl, DryWetMixer},
    node::GraphNode,
    through::Through,
};

pub trait NodeExt: GraphNode + Sized {
    fn through<F: GraphNode>(self, effect: F) -> Through<Self, F> {
        Through::new(self, effect)
    }

    /// Use `self` as the source of a dry/wet pair around `effect`.
    fn dry_wet<E: GraphNode>(self, effect: E, balance: BalanceControl) -> DryWetMixer<Self, E> {
        DryWetMixer::new(self, effect, balance)
    }
}

impl<T: GraphNode> NodeExt for T {}
