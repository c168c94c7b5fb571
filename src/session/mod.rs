pub mod collaborators;
pub mod orchestrator;
pub mod reveal;
pub mod state_machine;

pub use collaborators::{Cue, LogCue, RevealAnimator, RevealCallback, SoundCue, WheelAnimator};
pub use orchestrator::{DrawSequence, DrawSessionOrchestrator, RevealPhase, SessionSnapshot};
pub use reveal::{RevealLine, RevealLineKind, RevealScript};
pub use state_machine::{DrawEvent, DrawState, StateMachine, transition};
