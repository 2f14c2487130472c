// dataloader.rs
//! # DataLoader
//!
//! Le module `DataLoader` fournit une structure générique pour le chargement, le batching et le sampling de données.
//!
//! ## Exemple d'utilisation basique
//!
//! ```rust
//! use std::sync::Arc;
//! use fragset_data::{get_dataloader, default_transform, FragmentDatasetConfig, InMemorySource, LoaderConfig, RawImage};
//!
//! let images = vec![RawImage::filled(32, 32, 3, 0); 6];
//! let labels = vec![1_i64, 2, 3, 4, 5, 6];
//! let origins = vec!["a", "a", "b", "b", "c", "c"];
//! let source = InMemorySource::new(images, labels, origins);
//! let loader = get_dataloader(
//!     &source,
//!     FragmentDatasetConfig::default().n_fragments(2),
//!     LoaderConfig::default().batch_size(2),
//!     Arc::new(default_transform()),
//! ).expect("Pas d'erreur attendue");
//! for batch in loader {
//!     let batch = batch.expect("Pas d'erreur attendue");
//!     println!("Batch : {:?}", batch.images.shape());
//! }
//! ```
//!
//! ## Fonctionnalités principales
//!
//! - Batching automatique des données
//! - Sampling flexible via le trait `Sampler`
//! - Fonction de collation personnalisable
//! - Option pour ignorer le dernier batch incomplet (`drop_last`)
//! - Récupération des items d'un batch sur plusieurs threads (`num_workers`)

use crate::collate::{collate_fragments, FragmentBatch};
use crate::config::{FragmentDatasetConfig, LoaderConfig};
use crate::datasets::{Dataset, FragmentDataset};
use crate::samplers::{RandomSampler, Sampler, SequentialSampler};
use crate::storage::FragmentSource;
use crate::transforms::Transform;
use fragset_core::FragsetError;
use log::debug;
use std::any::Any;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::thread;

/// Type pour la fonction de collation.
///
/// Cette fonction prend un vecteur de samples (issus du dataset) et retourne un batch prêt à être utilisé par le modèle.
pub type CollateFn<D, B> =
    Box<dyn Fn(Vec<<D as Dataset>::Item>) -> Result<B, FragsetError> + Send + Sync>;

/// DataLoader générique pour le batching et le sampling de données.
///
/// # Paramètres de type
/// - `D`: Le type du dataset, qui doit implémenter le trait [`Dataset`].
/// - `S`: Le type du sampler, qui doit implémenter le trait [`Sampler`].
/// - `B`: Le type de batch produit par la fonction de collation.
pub struct DataLoader<D: Dataset, S: Sampler, B = Vec<<D as Dataset>::Item>> {
    /// Le dataset source.
    pub dataset: D,
    /// La taille des batches.
    pub batch_size: usize,
    /// Le sampler utilisé pour générer les indices.
    pub sampler: S,
    /// Si vrai, le dernier batch est ignoré s'il est incomplet.
    pub drop_last: bool,
    /// Nombre de threads utilisés pour récupérer les items d'un batch (0 = aucun).
    pub num_workers: usize,
    collate_fn: CollateFn<D, B>,
    indices_iter: Box<dyn Iterator<Item = usize> + Send + Sync>,
    epoch: u64,
}

impl<D: Dataset, S: Sampler, B> DataLoader<D, S, B> {
    /// Crée un nouveau DataLoader.
    ///
    /// # Arguments
    /// - `dataset`: Le dataset à utiliser.
    /// - `batch_size`: La taille des batches.
    /// - `sampler`: Le sampler pour générer les indices.
    /// - `drop_last`: Si vrai, le dernier batch est ignoré s'il est incomplet.
    /// - `collate_fn`: Fonction de collation.
    pub fn new(
        dataset: D,
        batch_size: usize,
        sampler: S,
        drop_last: bool,
        collate_fn: CollateFn<D, B>,
    ) -> Self {
        let indices_iter = sampler.iter(dataset.len());
        Self {
            dataset,
            batch_size,
            sampler,
            drop_last,
            num_workers: 0,
            collate_fn,
            indices_iter,
            epoch: 0,
        }
    }

    /// Fixe le nombre de threads de récupération.
    pub fn with_num_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers;
        self
    }

    /// Commence l'époque suivante : le compteur d'époques avance et le sampler
    /// est interrogé à nouveau (un `RandomSampler` avec graine tire alors un nouvel ordre).
    pub fn reset(&mut self) {
        self.epoch += 1;
        debug!(
            "DataLoader epoch {} start: {} items, batch_size={}, num_workers={}",
            self.epoch,
            self.dataset.len(),
            self.batch_size,
            self.num_workers
        );
        self.sampler.set_epoch(self.epoch);
        self.indices_iter = self.sampler.iter(self.dataset.len());
    }

    /// Époque en cours, 0 pour la première passe.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Nombre de batches par époque.
    pub fn num_batches(&self) -> usize {
        if self.batch_size == 0 {
            return 0;
        }
        let n = self.sampler.len(self.dataset.len());
        if self.drop_last {
            n / self.batch_size
        } else {
            n.div_ceil(self.batch_size)
        }
    }
}

impl<D: Dataset, S: Sampler> DataLoader<D, S> {
    /// Crée un DataLoader avec la fonction de collation par défaut (simple agrégation en `Vec`).
    pub fn with_default_collate(dataset: D, batch_size: usize, sampler: S, drop_last: bool) -> Self {
        let collate_fn: CollateFn<D, Vec<D::Item>> = Box::new(|batch| Ok(batch));
        Self::new(dataset, batch_size, sampler, drop_last, collate_fn)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

impl<D: Dataset + Sync, S: Sampler, B> DataLoader<D, S, B> {
    fn fetch(&self, indices: &[usize]) -> Result<Vec<D::Item>, FragsetError> {
        if self.num_workers == 0 || indices.len() < 2 {
            return indices.iter().map(|&i| self.dataset.get(i)).collect();
        }

        // Consecutive chunks, one per worker, so concatenating the results keeps sampler order.
        let chunk_size = indices.len().div_ceil(self.num_workers);
        let dataset = &self.dataset;
        let results: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = indices
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|&i| dataset.get(i))
                            .collect::<Result<Vec<_>, _>>()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join()).collect()
        });

        let mut items = Vec::with_capacity(indices.len());
        for result in results {
            let chunk = result
                .map_err(|payload| FragsetError::WorkerPanicked(panic_message(&*payload)))??;
            items.extend(chunk);
        }
        Ok(items)
    }
}

impl<D: Dataset + Sync, S: Sampler, B> Iterator for DataLoader<D, S, B> {
    type Item = Result<B, FragsetError>;

    /// Renvoie le prochain batch de données.
    ///
    /// # Retour
    /// - `Some(Ok(batch))` : Un batch de données prêt à l'emploi.
    /// - `Some(Err(e))` : Une erreur lors de la récupération d'un item ou de la collation.
    /// - `None` : Plus de données à itérer.
    fn next(&mut self) -> Option<Self::Item> {
        let indices: Vec<usize> = self.indices_iter.by_ref().take(self.batch_size).collect();
        if indices.is_empty() || (self.drop_last && indices.len() < self.batch_size) {
            return None;
        }
        match self.fetch(&indices) {
            Ok(batch) => Some((self.collate_fn)(batch)),
            Err(e) => Some(Err(e)),
        }
    }
}

/// The loader returned by [`get_dataloader`].
pub type FragmentLoader<K, I, L> =
    DataLoader<FragmentDataset<K, I, L>, Box<dyn Sampler>, FragmentBatch<K, L>>;

/// Builds a [`FragmentDataset`] from `source` and wraps it in a batching loader.
///
/// With `shuffle`, origin groups are visited in random order (seeded if
/// `loader_config.seed` is set); otherwise in key-list order. Batches are
/// assembled with [`collate_fragments`], so every group in a batch must yield
/// the same number of fragments.
///
/// The loader is an iterator over one epoch and is exhausted after a single
/// pass. Call [`DataLoader::reset`] to start the next epoch; with `shuffle` it
/// reshuffles, including when a seed is set (the seeded order changes per
/// epoch but the whole run is reproducible).
pub fn get_dataloader<S, K, I, L>(
    source: &S,
    dataset_config: FragmentDatasetConfig,
    loader_config: LoaderConfig,
    transform: Arc<dyn Transform<I>>,
) -> Result<FragmentLoader<K, I, L>, FragsetError>
where
    S: FragmentSource<Image = I, Label = L, Key = K>,
    K: Eq + Hash + Ord + Clone + Debug + Send + 'static,
    L: Clone + Send + Sync + 'static,
{
    loader_config.validate()?;
    let dataset = FragmentDataset::new(source, dataset_config, transform)?;
    let sampler: Box<dyn Sampler> = if loader_config.shuffle {
        Box::new(RandomSampler::new(false, None).with_seed(loader_config.seed))
    } else {
        Box::new(SequentialSampler::new())
    };
    let collate_fn: CollateFn<FragmentDataset<K, I, L>, FragmentBatch<K, L>> =
        Box::new(collate_fragments::<K, L>);
    let loader = DataLoader::new(
        dataset,
        loader_config.batch_size,
        sampler,
        loader_config.drop_last,
        collate_fn,
    )
    .with_num_workers(loader_config.num_workers);
    Ok(loader)
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
