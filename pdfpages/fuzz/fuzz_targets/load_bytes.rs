#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfpages::io::PdfReader;
use pdfpages::ops::reverse_pages;

fuzz_target!(|data: &[u8]| {
    // Loading arbitrary bytes must fail cleanly, and anything that loads
    // must survive a rebuild.
    if let Ok(doc) = PdfReader::new().load_bytes(data) {
        let _ = reverse_pages(&doc);
    }
});
