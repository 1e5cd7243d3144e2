mod confirmation;
pub use confirmation::*;

mod eq_update;
pub use eq_update::*;

mod loadable;
pub use loadable::*;

mod request_loadable;
pub use request_loadable::*;

mod timer;
pub use timer::*;
