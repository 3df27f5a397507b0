pub(crate) mod registration_service;
pub(crate) mod risk;
