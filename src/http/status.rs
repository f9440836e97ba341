#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatus {
    Ok = 200,

    BadRequest = 400,
    NotFound = 404,
    MethodNotAllowed = 405,

    InternalServerError = 500,
}

impl HttpStatus {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn reason(self) -> &'static str {
        match self {
            HttpStatus::Ok => "OK",                                        // 200
            HttpStatus::BadRequest => "Bad Request",                       // 400
            HttpStatus::NotFound => "Not Found",                           // 404
            HttpStatus::MethodNotAllowed => "Method Not Allowed",          // 405
            HttpStatus::InternalServerError => "Internal Server Error",    // 500
        }
    }
}
