pub const SUCCESS_MESSAGE: &str = "Thanks for your valuable suggestion!";
pub const ERROR_INVALID_EMAIL: &str = "Invalid email";

/// Counted in `char`s, not bytes. The textarea's `maxlength` counts UTF-16
/// units, so in the browser that limit is the stricter one.
pub const MESSAGE_MAX_LEN: usize = 1000;
pub const MAX_ATTACHMENTS: usize = 2;

pub const THUMBNAIL_WIDTH: u32 = 50;
pub const THUMBNAIL_HEIGHT: u32 = 50;
pub const THUMBNAIL_MIME: &str = "image/jpeg";

pub static ACCEPT_IMAGES: &'static str = "image/*";

// ECMAScript `\s` differs from Unicode `White_Space`: U+FEFF in, U+0085 out.
macro_rules! non_space_or_at {
    () => {
        r"[^\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}@]+"
    };
}

/// `^[^\s@]+@[^\s@]+\.[^\s@]+$` with `\s` taken in the ECMAScript sense.
pub static EMAIL_PATTERN: &'static str = concat!(
    "^", non_space_or_at!(), "@", non_space_or_at!(), r"\.", non_space_or_at!(), "$"
);
