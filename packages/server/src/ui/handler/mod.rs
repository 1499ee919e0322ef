mod http;
mod websocket;

pub use http::{
    health_check, messages_by_thread, require_auth, send_message, update_last_seen, upload_file,
};
pub use websocket::websocket_handler;
