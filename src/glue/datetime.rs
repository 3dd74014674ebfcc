/// Calendar time broken into fields, months counted from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExplodedTime {
    pub year: i32,
    /// 0 = January.
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub microsecond: u32,
    pub gmt_offset_seconds: i32,
    pub dst_offset_seconds: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessRole {
    Parent,
    Child,
}

/// The metric storage across the FFI boundary.
pub trait DatetimeStore {
    #[allow(clippy::too_many_arguments)]
    fn set(
        &self,
        id: u32,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        nanosecond: u32,
        offset_seconds: i32,
    );

    fn test_has_value(&self, id: u32, storage_name: &str) -> bool;

    fn test_get_value(&self, id: u32, storage_name: &str) -> String;

    fn process_role(&self) -> ProcessRole;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatetimeMetric {
    id: u32,
}

impl DatetimeMetric {
    pub const fn new(id: u32) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn set(&self, store: &impl DatetimeStore, value: &ExplodedTime) {
        store.set(
            self.id,
            value.year,
            value.month + 1,
            value.day,
            value.hour,
            value.minute,
            value.second,
            value.microsecond * 1000,
            value.gmt_offset_seconds + value.dst_offset_seconds,
        );
    }

    /// **Test-only.** The stored value, if any.
    ///
    /// # Panics
    ///
    /// Outside the parent process.
    pub fn test_get_value(&self, store: &impl DatetimeStore, storage_name: &str) -> Option<String> {
        assert_eq!(
            store.process_role(),
            ProcessRole::Parent,
            "datetime metric {} read outside the parent process",
            self.id
        );
        if !store.test_has_value(self.id, storage_name) {
            return None;
        }
        Some(store.test_get_value(self.id, storage_name))
    }
}
