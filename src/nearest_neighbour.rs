//! A result item returned by a query.

use std::cmp::Ordering;

/// Represents an entry in the results of a nearest neighbour query, with
/// `distance` being the distance of this particular point from the query
/// point, and `item` being the index of that point within the point set
/// the tree was built over.
#[derive(Debug, Copy, Clone)]
pub struct NearestNeighbour<A> {
    /// the distance of the found point from the query point according to
    /// the distance metric the query was run with
    pub distance: A,
    /// the index of the found point within the tree's point set
    pub item: u32,
}

impl<A: PartialOrd> Ord for NearestNeighbour<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

#[allow(unknown_lints)]
#[allow(clippy::non_canonical_partial_ord_impl)]
impl<A: PartialOrd> PartialOrd for NearestNeighbour<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.distance.partial_cmp(&other.distance)
    }
}

impl<A: PartialEq> Eq for NearestNeighbour<A> {}

impl<A: PartialEq> PartialEq for NearestNeighbour<A> {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance && self.item == other.item
    }
}

impl<A> From<NearestNeighbour<A>> for (A, u32) {
    fn from(elem: NearestNeighbour<A>) -> Self {
        (elem.distance, elem.item)
    }
}

#[cfg(test)]
mod tests {
    use super::NearestNeighbour;
    use std::cmp::Ordering;

    #[test]
    fn test_from_tuple() {
        let nn: (f32, u32) = NearestNeighbour::<f32> {
            distance: 1.0f32,
            item: 1,
        }
        .into();

        assert_eq!(nn.0, 1.0f32);
        assert_eq!(nn.1, 1);
    }

    #[test]
    fn test_ordering_is_by_distance_only() {
        let a = NearestNeighbour {
            distance: 1.0f32,
            item: 10,
        };
        let b = NearestNeighbour {
            distance: 2.0f32,
            item: 2,
        };

        assert_eq!(a.cmp(&b), Ordering::Less);
        assert_eq!(b.cmp(&a), Ordering::Greater);
        assert_eq!(a.partial_cmp(&b), Some(Ordering::Less));
    }
}
