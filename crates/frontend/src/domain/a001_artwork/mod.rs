pub mod api;
pub mod selection;
#[cfg(test)]
pub(crate) mod test_support;
pub mod ui;
