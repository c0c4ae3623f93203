//! Static HTML pages, embedded at compile time.

pub const LANDING: &str = include_str!("../static/index.html");
pub const SUCCESS: &str = include_str!("../static/sucesso.html");
pub const CANCELLED: &str = include_str!("../static/cancelado.html");
pub const CREATE: &str = include_str!("../static/criar.html");
pub const DENIED: &str = include_str!("../static/negado.html");
