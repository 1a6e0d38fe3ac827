/// Lazy enumeration of every combination of parameter fragments
///
/// Walks the product like an odometer: the last list is the fastest digit.
/// Each item is the concatenation of one fragment per list, in list order.
/// With no lists at all there is exactly one (empty) combination; if any list
/// is empty there are none.
#[derive(Debug, Clone)]
pub struct CartesianValues<'a> {
    lists: &'a [Vec<String>],
    indices: Vec<usize>,
    remaining: usize,
}

impl<'a> CartesianValues<'a> {
    pub fn new(lists: &'a [Vec<String>]) -> Self {
        let remaining = product_len(lists.iter().map(Vec::len)).unwrap_or(usize::MAX);
        Self {
            lists,
            indices: vec![0; lists.len()],
            remaining,
        }
    }

    fn advance(&mut self) {
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.lists[pos].len() {
                return;
            }
            self.indices[pos] = 0;
        }
    }
}

impl Iterator for CartesianValues<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }

        let combination: String = self
            .indices
            .iter()
            .zip(self.lists)
            .map(|(&idx, list)| list[idx].as_str())
            .collect();

        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(combination)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Starts a fresh enumeration over `lists`
pub fn cartesian_values(lists: &[Vec<String>]) -> CartesianValues<'_> {
    CartesianValues::new(lists)
}

/// Product of the given lengths, `None` on overflow
pub(crate) fn product_len<I>(lens: I) -> Option<usize>
where
    I: IntoIterator<Item = usize>,
{
    lens.into_iter().try_fold(1usize, |acc, len| acc.checked_mul(len))
}
