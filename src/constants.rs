use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

pub const QUOTES_PREFIX: &str = "/cotizaciones";
pub const NOTIFICATIONS_API_PREFIX: &str = "/notificaciones/api";
pub const LOANS_PATH: &str = "/cotizaciones/prestamos/";

pub const DARK_MODE_STORAGE_KEY: &str = "darkMode";
pub const FAVORITES_STORAGE_KEY: &str = "favoritos";

pub const CSRF_HEADER_NAME: &str = "X-CSRFToken";
pub const CSRF_COOKIE_NAME: &str = "csrftoken";
pub const CSRF_META_NAME: &str = "csrf-token";
pub const CSRF_INPUT_NAME: &str = "csrfmiddlewaretoken";

pub const CALENDAR_DAY_PREVIEW_SIZE: usize = 3;
pub const DEFAULT_NOTE_COLOR: &str = "#3b82f6";

pub const NOTIFICATIONS_LIMIT: usize = 5;
pub const NOTIFICATIONS_POLL_INTERVAL: Duration = Duration::from_secs(60);

pub const CAROUSEL_STEP: i32 = 220;
pub const CAROUSEL_INTERVAL: Duration = Duration::from_millis(4000);
/// Distance from the right edge at which auto-scroll wraps back to the start.
pub const CAROUSEL_WRAP_TOLERANCE: i32 = 10;
pub const COUNTER_TARGET: u32 = 20;
pub const COUNTER_DURATION: Duration = Duration::from_millis(2000);
pub const TOAST_DURATION: Duration = Duration::from_millis(5000);
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
pub const SCROLL_THROTTLE: Duration = Duration::from_millis(100);
pub const RATING_MAX: u8 = 5;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Por favor completa todos los campos requeridos";
pub const NO_CATEGORY_LABEL: &str = "Sin categoría";

pub const URI_COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');
