pub(crate) mod logging;
pub(crate) mod recaptcha;
pub(crate) mod settings;
pub(crate) mod templates;
