//! Turn clicks along the horizon of a panoramic photo into an
//! azimuth/elevation `.hrz` horizon profile.

pub mod angle;
pub mod error;
pub mod grid;
pub mod hrz;
pub mod point;
pub mod profile;
pub mod session;

pub use angle::AngleConverter;
pub use error::{ExportError, ProfileError};
pub use grid::{AngleGrid, GridLine};
pub use hrz::{render_hrz, save_hrz, write_hrz, HrzStyle};
pub use point::{ClickPoint, HorizonPoint};
pub use profile::{build_profile, HorizonProfile, ProfileOrdering};
pub use session::{ExportOptions, Session};
