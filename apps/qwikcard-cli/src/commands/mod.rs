pub mod config;
pub mod create;
pub mod export;
pub mod show;
pub mod types;

pub use config::ConfigCmd;
pub use create::CreateArgs;
pub use export::ExportArgs;
pub use show::ShowArgs;
pub use types::TypesArgs;
