pub mod cleanup_guard;
pub mod config_error;
pub mod consts;
pub mod create_args;
pub mod image_record;
