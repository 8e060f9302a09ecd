/// reading mechanism and configuration files with readable JSON error reports
pub mod load_from_file;
