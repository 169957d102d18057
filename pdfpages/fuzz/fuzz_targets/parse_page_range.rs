#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfpages::parse_page_range;

fuzz_target!(|data: &[u8]| {
    let Some((&total, rest)) = data.split_first() else {
        return;
    };
    let input = String::from_utf8_lossy(rest);
    let total = total as usize;

    // Whatever the input, a successful parse is sorted, unique and in bounds.
    if let Ok(indices) = parse_page_range(&input, total) {
        assert!(!indices.is_empty());
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        assert!(indices.iter().all(|&i| i < total));
    }
});
