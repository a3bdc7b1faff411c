pub mod event;
pub mod gallery_item;
pub mod localized;
pub mod partner;
pub mod post;
pub mod project;
pub mod team_member;

pub use event::{Event, EventCategory, EventCategoryFilter, EventSort};
pub use gallery_item::{GalleryItem, GallerySort, GalleryVisibilityFilter};
pub use localized::{Locale, LocalizedText};
pub use partner::{Partner, PartnerSort, PartnerTier, PartnerTierFilter};
pub use post::{Post, PostSort, PostStatus, PostStatusFilter};
pub use project::{Project, ProjectSort, ProjectStatus, ProjectStatusFilter};
pub use team_member::{Committee, CommitteeFilter, TeamMember, TeamSort};
