pub mod topology;
pub mod params;
pub mod snapshot;
pub mod forward;
pub mod backprop;
pub mod network;

pub use topology::Topology;
pub use params::Parameters;
pub use snapshot::{ActivationSnapshot, LayerData, Link, NeuronData};
pub use forward::feed_forward;
pub use backprop::{backpropagate, compute_gradients, Gradients};
pub use network::Network;
