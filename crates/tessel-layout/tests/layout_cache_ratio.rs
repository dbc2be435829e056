use tessel_core::geometry::Rect;
use tessel_layout::{Constraint, Direction, Layout, LayoutCache, LayoutCacheKey};

#[test]
fn ratio_canonicalization() {
    let area = Rect::new(0, 0, 100, 100);
    let l1 = Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]);
    let l2 = Layout::horizontal([Constraint::Ratio(2, 4), Constraint::Ratio(3, 6)]);

    let k1 = LayoutCacheKey::new(area, &l1);
    let k2 = LayoutCacheKey::new(area, &l2);

    assert_eq!(
        k1, k2,
        "Ratio(1,2) and Ratio(2,4) should be equivalent for caching"
    );
}

#[test]
fn equivalent_ratios_share_a_cache_entry() {
    let area = Rect::new(0, 0, 90, 3);
    let mut cache = LayoutCache::default();

    let a = Layout::horizontal([Constraint::Ratio(1, 3), Constraint::Min(0)])
        .split_cached(area, &mut cache);
    let b = Layout::horizontal([Constraint::Ratio(3, 9), Constraint::Min(0)])
        .split_cached(area, &mut cache);

    assert_eq!(a, b);
    assert_eq!(a[0].width, 30);
    let stats = cache.stats();
    assert_eq!((stats.hits, stats.misses, stats.entries), (1, 1, 1));
}

#[test]
fn distinct_layouts_do_not_collide() {
    let area = Rect::new(0, 0, 40, 40);
    let horizontal = Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Min(0)]);
    let vertical = horizontal.clone().direction(Direction::Vertical);
    let mut cache = LayoutCache::new(8);

    let h = horizontal.split_cached(area, &mut cache);
    let v = vertical.split_cached(area, &mut cache);

    assert_eq!(h[0], Rect::new(0, 0, 20, 40));
    assert_eq!(v[0], Rect::new(0, 0, 40, 20));
    assert_eq!(cache.stats().misses, 2);
}
