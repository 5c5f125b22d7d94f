pub mod account;
pub mod artifact;
pub mod artist;
pub mod edit_log;
pub mod event;
pub mod exhibit;
pub mod museum;
pub mod review;

pub use account::{
    Account, AccountUpdate, EmployeeInfo, EmployeeSummary, NewAccount, RoleAssignment, SupervisorInfo,
};
pub use artifact::{Artifact, ArtifactDetail, ArtifactUpdate, NewArtifact, DEFAULT_DISPLAY_STATUS};
pub use artist::{Artist, ArtistUpdate, NewArtist};
pub use edit_log::{EditAction, EditLog, EditStamp, EditTarget};
pub use event::{Event, EventDetail, EventUpdate, NewEvent};
pub use exhibit::{Exhibit, ExhibitUpdate, NewExhibit};
pub use museum::Museum;
pub use review::{ArtifactReview, EventReview, VisitorReviews};
