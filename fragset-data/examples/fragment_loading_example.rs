//! Exemple d'utilisation du DataLoader avec un FragmentDataset.
//!
//! Des crops synthétiques sont regroupés par image d'origine, puis chargés par batchs.

use fragset_data::{
    default_transform, get_dataloader, FragmentDatasetConfig, InMemorySource, LoaderConfig,
    RawImage,
};
use rand::Rng;
use std::sync::Arc;

fn main() {
    env_logger::init();

    // 40 origin images, each cut into 2 to 5 crops of 32x32 RGB
    let mut rng = rand::thread_rng();
    let mut images = Vec::new();
    let mut labels = Vec::new();
    let mut origins = Vec::new();
    for origin in 0..40 {
        for _ in 0..rng.gen_range(2..=5) {
            let pixels = (0..32 * 32 * 3).map(|_| rng.gen()).collect();
            images.push(RawImage::new(32, 32, 3, pixels).expect("Image synthétique valide"));
            labels.push(rng.gen_range(0..10_i64));
            origins.push(format!("house_{:03}.png", origin).into_bytes());
        }
    }
    let source = InMemorySource::new(images, labels, origins);

    // Only origins with at least n_fragments crops batch cleanly, hence n_fragments=2.
    let loader = get_dataloader(
        &source,
        FragmentDatasetConfig::default().n_fragments(2).portion(0.5),
        LoaderConfig::default().batch_size(8).num_workers(2).seed(0),
        Arc::new(default_transform()),
    )
    .expect("Construction du loader ok");

    println!("\n--- {} groupes, {} batchs ---", loader.dataset.index().len(), loader.num_batches());
    for (i, batch) in loader.enumerate() {
        let batch = batch.expect("Pas d'erreur attendue");
        let first = String::from_utf8_lossy(&batch.origins[0]).into_owned();
        println!(
            "Batch {i} : images {:?}, labels {:?}, première origine {first}",
            batch.images.shape(),
            batch.labels.shape()
        );
    }
}
