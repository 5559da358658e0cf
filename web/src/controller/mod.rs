pub(crate) mod health_check_controller;
pub(crate) mod payment_totals_controller;
pub(crate) mod reservation_controller;
pub(crate) mod style_controller;
