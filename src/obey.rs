use std::collections::BTreeSet;
use std::fmt::Debug;

///
/// A support trait for testing any kind of key value collection against a model.
///
/// Lookups are compared at "interesting" sample points rather than over the whole key
/// space: the stored keys themselves and their immediate neighbours.
///
pub trait TestSamples<K, V> {
    /// produces "interesting" sample points to test a property for.
    fn samples(&self, res: &mut BTreeSet<K>);

    /// gets the value of the collection at position k
    fn at(&self, k: K) -> V;
}

/// true if `actual` and `model` agree at every sample point of either
pub fn model_test<A, B, K, V>(actual: &A, model: &B) -> bool
where
    A: TestSamples<K, V> + Debug,
    B: TestSamples<K, V> + Debug,
    K: Ord + Clone + Debug,
    V: Eq + Debug,
{
    let mut s: BTreeSet<K> = BTreeSet::new();
    actual.samples(&mut s);
    model.samples(&mut s);
    s.into_iter().all(|key| {
        let value = actual.at(key.clone());
        let expected = model.at(key.clone());
        if expected != value {
            println!(
                "expected!=actual at: {:?}. {:?}!={:?}",
                key, expected, value
            );
            println!("actual: {:?}", actual);
            println!("model: {:?}", model);
            false
        } else {
            true
        }
    })
}
