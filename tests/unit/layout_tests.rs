/*!
 * Layout engine properties over longer token streams
 */

use pictoscribe::layout::{Glyph, LayoutConfig, LayoutEngine, LayoutItem, Page};

/// Deterministic pseudo-random sizes
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u32) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) % bound as u64) as u32
    }
}

fn word(text: &str, width: u32, height: u32) -> LayoutItem {
    LayoutItem::new(text, Glyph::filled(width, height, 0))
}

fn random_stream(count: usize) -> Vec<LayoutItem> {
    let mut rng = Lcg(42);
    (0..count)
        .map(|i| match rng.next(10) {
            0 => LayoutItem::new("\n", Glyph::empty()),
            1 => word(".", 1 + rng.next(10), 20),
            2 => word("(", 1 + rng.next(10), 20),
            _ => word(&format!("w{}", i), 1 + rng.next(260), 1 + rng.next(120)),
        })
        .collect()
}

fn placed_items(pages: &[Page]) -> Vec<usize> {
    pages
        .iter()
        .flat_map(|page| page.placements().iter().map(|p| p.item))
        .collect()
}

#[test]
fn test_layout_withRandomStream_shouldKeepEveryGlyphInsideThePage() {
    let cfg = LayoutConfig::new(200, 250, 20);
    let engine = LayoutEngine::new(cfg).unwrap();
    let pages = engine.layout(&random_stream(400));

    assert!(pages.len() > 1);
    for page in &pages {
        assert_eq!((page.width(), page.height()), (200, 250));
        for p in page.placements() {
            assert!(p.right() <= cfg.page_width, "{:?} overflows the width", p);
            assert!(p.bottom() <= cfg.page_height, "{:?} overflows the height", p);
        }
    }
}

#[test]
fn test_layout_withRandomStream_shouldPlaceEveryGlyphOnceInOrder() {
    let items = random_stream(300);
    let engine = LayoutEngine::new(LayoutConfig::new(200, 250, 20)).unwrap();
    let placed = placed_items(&engine.layout(&items));

    let expected: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.glyph.is_empty())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(placed, expected);
}

#[test]
fn test_layout_withTrailingPunctuationPair_shouldKeepPairTogether() {
    let engine = LayoutEngine::new(LayoutConfig::new(200, 400, 20)).unwrap();
    let items = vec![
        word("aaa", 50, 20),
        word("bbb", 50, 20),
        word("cat", 60, 20),
        word(".", 10, 20),
    ];
    let pages = engine.layout(&items);
    let placements = pages[0].placements();

    // "bbb cat ." would end past the right edge, so the run moves down together
    assert_eq!(placements[0].y, 0);
    assert_eq!(placements[1].y, 60);
    assert_eq!(placements[2].y, placements[3].y);
    assert_eq!(placements[3].x, placements[2].right() + 2);
}

#[test]
fn test_layout_withOpeningPunctuationAhead_shouldMoveRunToNextLine() {
    let engine = LayoutEngine::new(LayoutConfig::new(200, 400, 20)).unwrap();
    let items = vec![
        word("aaaa", 120, 20),
        word("(", 10, 20),
        word("dog", 40, 20),
    ];
    let pages = engine.layout(&items);
    let placements = pages[0].placements();

    assert_eq!(placements[0].y, 60);
    assert_eq!(placements[1].y, placements[2].y);
}

#[test]
fn test_layout_withPageBreak_shouldStartNextPageAtTop() {
    let engine = LayoutEngine::new(LayoutConfig::new(100, 120, 20)).unwrap();
    let items: Vec<LayoutItem> = (0..5).map(|i| word(&format!("w{}", i), 70, 20)).collect();
    let pages = engine.layout(&items);

    for page in &pages[1..] {
        assert_eq!(page.placements()[0].y, 0);
        assert!(page.placements().iter().all(|p| p.y < 120));
    }
}
