/// A constant length array with a variable length exposed slice at runtime.
///
/// Used for the packet payload, which is filled and drained once per eight
/// units, so it never needs to live on the heap.
#[derive(Debug, Clone)]
pub struct ConstVariableArr<T, const MAX_LEN: usize> {
    arr: [T; MAX_LEN],
    len: usize,
}

impl<T, const MAX_LEN: usize> ConstVariableArr<T, MAX_LEN> {
    pub fn new(val: T, len: usize) -> Self
    where
        T: Clone,
    {
        assert!(len <= MAX_LEN, "len: {}, MAX_LEN: {}", len, MAX_LEN);

        Self {
            arr: array_macro::array![val; MAX_LEN],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn remaining(&self) -> usize {
        MAX_LEN - self.len
    }

    pub fn push(&mut self, val: T) {
        if self.len == MAX_LEN {
            panic!("Tried to push past the capacity of {}", MAX_LEN);
        }

        self.arr[self.len] = val;
        self.len += 1;
    }

    pub fn extend_from_slice(&mut self, vals: &[T])
    where
        T: Copy,
    {
        if vals.len() > self.remaining() {
            panic!(
                "vals.len(): {}, remaining(): {}",
                vals.len(),
                self.remaining()
            );
        }

        self.arr[self.len..self.len + vals.len()].copy_from_slice(vals);
        self.len += vals.len();
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn as_slice(&self) -> &[T] {
        &self.arr[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.arr[..self.len]
    }
}

impl<T, const MAX_LEN: usize> std::ops::Deref for ConstVariableArr<T, MAX_LEN> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, const MAX_LEN: usize> std::ops::DerefMut for ConstVariableArr<T, MAX_LEN> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_clear() {
        let mut arr = ConstVariableArr::<u8, 4>::new(0, 0);
        assert!(arr.is_empty());

        arr.push(7);
        arr.extend_from_slice(&[8, 9]);
        assert_eq!(arr.as_slice(), &[7, 8, 9]);
        assert_eq!(arr.remaining(), 1);

        arr.clear();
        assert!(arr.is_empty());
        assert_eq!(arr.remaining(), 4);
    }

    #[test]
    fn test_deref_exposes_only_len() {
        let mut arr = ConstVariableArr::<u8, 8>::new(5, 3);
        assert_eq!(&arr[..], &[5, 5, 5]);

        arr[1] = 1;
        assert_eq!(arr.iter().copied().sum::<u8>(), 11);
    }

    #[test]
    #[should_panic]
    fn test_push_past_capacity() {
        let mut arr = ConstVariableArr::<u8, 2>::new(0, 2);
        arr.push(1);
    }
}
