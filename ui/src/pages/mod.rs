//! Page components

pub mod adverts;
pub mod budgets;
pub mod campaigns;
pub mod clients;
pub mod concept_notes;
pub mod dashboard;
pub mod login;

pub use adverts::AdvertsPage;
pub use budgets::BudgetsPage;
pub use campaigns::CampaignsPage;
pub use clients::ClientsPage;
pub use concept_notes::ConceptNotesPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
