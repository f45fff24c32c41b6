// Gift-exchange draw engine.
//
// The engine turns an ordered participant list and a starting drawer into a
// single gift-giving cycle, one draw at a time. Input parsing and the draw
// preview live here too so every front end shares the same rules.

pub mod draw;
pub mod error;
pub mod preview;
pub mod roster;

pub use draw::assignment::Assignment;
pub use draw::cycle::is_single_cycle;
pub use draw::game::Game;
pub use draw::session::{DrawStrategy, Phase, Session, MIN_PARTICIPANTS};
pub use error::{DrawError, SetupError};
