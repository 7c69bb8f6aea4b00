use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::shape::Shape;
use core::cmp::Ordering;
use core::ops::Range;

/// An item being packed, with its bounding box and the center used as sorting key.
pub(crate) struct Entry<S, T: Real, const D: usize> {
    center: Point<T, D>,
    aabb: Aabb<T, D>,
    item: S,
}

/// A group of items output by one packing level.
pub(crate) struct PackedGroup<S, T: Real, const D: usize> {
    /// The merged bounding boxes of all the `items`.
    pub aabb: Aabb<T, D>,
    pub items: Vec<S>,
}

/// Strategy used to sort the buckets of a packing level along one axis.
///
/// The buckets are disjoint, contiguous, and together cover all the entries.
pub(crate) trait SortBuckets<S, T: Real, const D: usize> {
    fn sort_buckets(entries: &mut [Entry<S, T, D>], buckets: &[Range<usize>], axis: usize);
}

/// Sorts every bucket one after the other.
pub(crate) enum Sequential {}

/// Sorts the buckets in parallel on the rayon thread pool.
#[cfg(feature = "parallel")]
pub(crate) enum Parallel {}

fn by_axis<S, T: Real, const D: usize>(
    axis: usize,
) -> impl Fn(&Entry<S, T, D>, &Entry<S, T, D>) -> Ordering {
    move |a: &Entry<S, T, D>, b: &Entry<S, T, D>| {
        a.center[axis]
            .partial_cmp(&b.center[axis])
            .unwrap_or(Ordering::Equal)
    }
}

/// Splits `entries` into one mutable slice per bucket.
fn bucket_slices<'a, E>(mut entries: &'a mut [E], buckets: &[Range<usize>]) -> Vec<&'a mut [E]> {
    let mut slices = Vec::with_capacity(buckets.len());

    for bucket in buckets {
        let (head, tail) = core::mem::take(&mut entries).split_at_mut(bucket.len());
        slices.push(head);
        entries = tail;
    }

    slices
}

impl<S, T: Real, const D: usize> SortBuckets<S, T, D> for Sequential {
    fn sort_buckets(entries: &mut [Entry<S, T, D>], buckets: &[Range<usize>], axis: usize) {
        for slice in bucket_slices(entries, buckets) {
            slice.sort_unstable_by(by_axis(axis));
        }
    }
}

#[cfg(feature = "parallel")]
impl<S: Send, T: Real, const D: usize> SortBuckets<S, T, D> for Parallel {
    fn sort_buckets(entries: &mut [Entry<S, T, D>], buckets: &[Range<usize>], axis: usize) {
        use rayon::prelude::*;

        bucket_slices(entries, buckets)
            .into_par_iter()
            .for_each(|slice| slice.sort_unstable_by(by_axis(axis)));
    }
}

/// The number of slices each bucket is split into, along every axis, when packing
/// `num_items` items into groups of at most `capacity` items in dimension `dim`.
///
/// This is `max(1, floor((num_items / capacity)^(1 / dim)))`. The floating-point root
/// is only an estimate: the result is corrected so that it is the largest integer `s`
/// with `s^dim * capacity <= num_items`.
pub(crate) fn branching_factor(num_items: usize, capacity: usize, dim: usize) -> usize {
    debug_assert!(capacity > 0 && dim > 0);

    let fits = |s: usize| {
        u32::try_from(dim)
            .ok()
            .and_then(|dim| s.checked_pow(dim))
            .and_then(|cells| cells.checked_mul(capacity))
            .is_some_and(|required| required <= num_items)
    };

    let estimate = (num_items as f64 / capacity as f64)
        .powf(1.0 / dim as f64)
        .floor();
    let mut s = (estimate as usize).max(1);

    while s > 1 && !fits(s) {
        s -= 1;
    }
    while s < usize::MAX && fits(s + 1) {
        s += 1;
    }

    s
}

/// Splits `range` into `parts` consecutive sub-ranges.
///
/// The first `range.len() % parts` sub-ranges get one more element than the others.
/// Empty sub-ranges are not emitted.
fn subdivide(range: Range<usize>, parts: usize, out: &mut Vec<Range<usize>>) {
    let base = range.len() / parts;
    let remainder = range.len() % parts;
    let mut start = range.start;

    for k in 0..parts {
        let size = base + (k < remainder) as usize;
        if size > 0 {
            out.push(start..start + size);
        }
        start += size;
    }

    debug_assert_eq!(start, range.end);
}

/// Runs one packing level: groups `items` into spatially coherent groups.
///
/// Every item's center is computed once. The same branching factor is then used to
/// sort and split the buckets along each axis, starting with a single bucket covering
/// all the items. Each final bucket becomes one group.
pub(crate) fn pack_level<X, S, T, const D: usize>(
    items: Vec<S>,
    capacity: usize,
) -> Vec<PackedGroup<S, T, D>>
where
    X: SortBuckets<S, T, D>,
    S: Shape<T, D>,
    T: Real,
{
    let num_items = items.len();
    let slices = branching_factor(num_items, capacity, D);

    let mut entries: Vec<_> = items
        .into_iter()
        .map(|item| {
            let aabb = item.bounding_box();
            Entry {
                center: aabb.center(),
                aabb,
                item,
            }
        })
        .collect();

    let mut buckets = vec![0..num_items];
    let mut next_buckets = Vec::new();

    for axis in 0..D {
        X::sort_buckets(&mut entries, &buckets, axis);

        for bucket in buckets.drain(..) {
            subdivide(bucket, slices, &mut next_buckets);
        }
        core::mem::swap(&mut buckets, &mut next_buckets);
    }

    // Since slices^D <= num_items, every bucket keeps at least one item.
    debug_assert!(num_items == 0 || buckets.len() == slices.pow(D as u32));

    let mut entries = entries.into_iter();
    let groups: Vec<_> = buckets
        .iter()
        .map(|bucket| {
            let mut aabb = Aabb::empty();
            let items = entries
                .by_ref()
                .take(bucket.len())
                .map(|entry| {
                    aabb.merge(&entry.aabb);
                    entry.item
                })
                .collect();
            PackedGroup { aabb, items }
        })
        .collect();

    log::trace!(
        "STR level: {} items, {} slices per axis, {} groups.",
        num_items,
        slices,
        groups.len()
    );

    groups
}
