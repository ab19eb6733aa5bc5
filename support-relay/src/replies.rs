//! Reply texts. Customers are answered in Ukrainian, staff in English.

/// Default greeting (Telegram HTML); replace with `GREETING_HTML`.
pub const DEFAULT_GREETING_HTML: &str = "<b>Вітаю!</b>\n\n\
Ви звернулися до служби підтримки.\n\n\
Менеджери відповідають на запити у робочий час; запити, надіслані поза ним, \
буде передано менеджеру на початку наступного робочого дня.\n";

pub const INSTRUCTIONS: &str = "Для зворотнього зв'язку, напишіть одним повідомленням: ім’я, \
номер телефону, VIN (за потреби) та коротко опишіть питання, яке вас цікавить.\n\n\
Для завершення спілкування введіть команду: /end";

pub const REQUEST_ACCEPTED: &str =
    "Дякуємо! Ваш запит зареєстровано. Менеджер зв’яжеться з вами у найближчий робочий час.";

pub const REQUEST_FAILED: &str =
    "Вибачте, не вдалося зареєструвати запит. Спробуйте, будь ласка, ще раз пізніше.";

pub const RESTART_HINT: &str = "Для початку нового спілкування введіть команду /start";

pub const STAFF_ACTIVATED: &str = "You are added to active Admins";
pub const STAFF_ALREADY_ACTIVE: &str = "You are already among active Admins";
pub const STAFF_DEACTIVATED: &str = "You are removed from active Admins";
pub const STAFF_NOT_ACTIVE: &str = "You are not among active Admins";
pub const STAFF_DENIED: &str = "Your ID is not among Admin IDs";
pub const STAFF_UNAVAILABLE: &str = "Request routing is unavailable, try again later";
