/// Serialized data on its way across a process boundary.
///
/// Move-only. The IPC layer needs an equality operator but never relies on
/// it, so two buffers never compare equal, not even a buffer with itself.
#[derive(Debug, Default)]
pub struct SerializedCloneBuffer {
    pub data: Vec<u8>,
}

impl SerializedCloneBuffer {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl PartialEq for SerializedCloneBuffer {
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::eq_op)]
    fn never_equal() {
        let a = SerializedCloneBuffer::new(vec![1, 2, 3]);
        let b = SerializedCloneBuffer::new(vec![1, 2, 3]);
        assert!(a != b);
        assert!(a != a);
        assert!(SerializedCloneBuffer::default() != SerializedCloneBuffer::default());
    }

    #[test]
    fn moves_keep_contents() {
        let a = SerializedCloneBuffer::new(vec![9; 4]);
        let b = a;
        assert_eq!(b.len(), 4);
        assert_eq!(b.into_inner(), vec![9; 4]);
    }
}
