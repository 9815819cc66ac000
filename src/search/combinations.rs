/// Every truth combination over `width` variables, as an odometer: the last position flips
/// fastest and the first slowest, so the sequence is plain binary counting from all-`false` to
/// all-`true`. A width of zero yields exactly one (empty) combination.
#[derive(Clone, Debug)]
pub struct Combinations {
    current: Vec<bool>,
    exhausted: bool,
}

impl Combinations {
    pub fn new(width: usize) -> Self {
        Self {
            current: vec![false; width],
            exhausted: false,
        }
    }

    pub fn restart(&mut self) {
        for bit in self.current.iter_mut() {
            *bit = false;
        }
        self.exhausted = false;
    }
}

impl Iterator for Combinations {
    type Item = Vec<bool>;

    fn next(&mut self) -> Option<Vec<bool>> {
        if self.exhausted {
            return None;
        }
        let item = self.current.clone();

        let mut carry = true;
        for bit in self.current.iter_mut().rev() {
            if *bit {
                *bit = false;
            } else {
                *bit = true;
                carry = false;
                break;
            }
        }
        // wrapped around to all-false
        self.exhausted = carry;

        Some(item)
    }
}
