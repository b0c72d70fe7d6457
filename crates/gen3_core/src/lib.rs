pub mod core_api;
pub mod diagnostics;
pub mod layout;
pub mod reader;
pub mod record;
pub mod sections;
pub mod slot;
pub mod version;
