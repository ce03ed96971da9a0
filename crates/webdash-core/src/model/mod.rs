// ── Domain model ──
//
// The session snapshot persisted between runs. Entity records (users,
// projects, ...) are used as the API returns them and never cached
// beyond one page view.

mod session;

pub use session::{Permission, Role, Session, SessionUpdate};
