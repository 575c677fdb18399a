mod command_handler;
mod display_event_handler;
mod focus_handler;
mod reconcile;
mod window_handler;

#[cfg(test)]
pub(crate) mod test_support;
