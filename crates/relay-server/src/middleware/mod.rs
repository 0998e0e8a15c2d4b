//! Middleware stack para el servidor HTTP.
//!
//! Los layers de Tower que envuelven todas las rutas, incluidas las del proxy:
//! - `RequestIdLayer`: genera o propaga `x-request-id`
//! - `LoggingLayer`: un span `http_request` por request, con el resultado del cache

mod logging;
mod request_id;

pub use logging::{LoggingLayer, LoggingMiddleware};
pub use request_id::{
    MAX_REQUEST_ID_LEN, REQUEST_ID_HEADER, RequestIdLayer, RequestIdMiddleware,
};
