pub mod logging;
pub mod text;
pub mod validation;

pub use logging::{VerboseLogger, log_error, log_warning, print_verbose};
pub use text::{pad_to_width, truncate_text_unicode};
pub use validation::{validate_email, validate_url};
