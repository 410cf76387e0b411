pub mod ask;
pub mod create_session_route;
pub mod history_route;
pub mod upload_document_route;
