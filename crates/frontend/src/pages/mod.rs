pub mod chat;
pub mod dashboard;
pub mod home;
pub mod quiz;
pub mod videos;

pub use chat::ChatPage;
pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use quiz::QuizPage;
pub use videos::VideosPage;
