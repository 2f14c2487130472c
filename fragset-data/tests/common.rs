use fragset_data::{InMemorySource, RawImage};

// Routes `log` output through the test harness. Safe to call from every test.
#[allow(dead_code)]
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A source whose crops are solid images; crop `i` has pixel value and label `i`.
#[allow(dead_code)]
pub(crate) fn solid_source(
    origins: &[&'static str],
    side: usize,
) -> InMemorySource<RawImage, i64, &'static str> {
    let images = (0..origins.len())
        .map(|i| RawImage::filled(side, side, 3, i as u8))
        .collect();
    let labels = (0..origins.len() as i64).collect();
    InMemorySource::new(images, labels, origins.to_vec())
}
