/// Entity `show` flag. Entities without one are shown.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Visibility {
    pub show: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self { show: true }
    }
}

impl From<bool> for Visibility {
    fn from(show: bool) -> Self {
        Self { show }
    }
}
