//! Registry of pluggable framework components
//!
//! Models, losses, samplers, transforms, and datasets are provided by the
//! training framework at runtime. Validation resolves every configured name
//! against this registry, so a typo fails at load time instead of surfacing
//! as a lookup panic halfway through an experiment.

use std::collections::BTreeMap;

/// Component family a name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Model,
    Loss,
    Sampler,
    Transform,
    Dataset,
}

impl Family {
    /// Noun used in error messages ("unknown model 'x'")
    pub fn noun(self) -> &'static str {
        match self {
            Family::Model => "model",
            Family::Loss => "loss",
            Family::Sampler => "sampler",
            Family::Transform => "transform",
            Family::Dataset => "dataset",
        }
    }
}

/// Capability descriptor attached to a registered name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    /// One-line summary shown in listings and error messages
    pub summary: String,
}

impl Descriptor {
    pub fn new(summary: impl Into<String>) -> Self {
        Self { summary: summary.into() }
    }
}

/// Name -> descriptor maps, one namespace per component family
#[derive(Debug, Clone, Default)]
pub struct Registry {
    models: BTreeMap<String, Descriptor>,
    losses: BTreeMap<String, Descriptor>,
    samplers: BTreeMap<String, Descriptor>,
    transforms: BTreeMap<String, Descriptor>,
    datasets: BTreeMap<String, Descriptor>,
}

impl Registry {
    /// Registry with no components; useful for tests and embedders that
    /// register everything themselves.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry seeded with the framework's built-in components.
    pub fn builtin() -> Self {
        let mut reg = Self::default();

        for (name, summary) in [
            ("bdnet", "ResNet-50 backbone with top drop-block branch"),
            ("resnet50", "ResNet-50 global-feature baseline"),
            ("resnet50_fc512", "ResNet-50 with 512-d embedding head"),
            ("resnet101", "ResNet-101 global-feature baseline"),
            ("osnet_x1_0", "Omni-scale network, width x1.0"),
            ("osnet_x0_5", "Omni-scale network, width x0.5"),
            ("mlfn", "Multi-level factorisation network"),
            ("hacnn", "Harmonious attention network"),
            ("pcb_p6", "Part-based convolutional baseline, 6 parts"),
        ] {
            reg.register(Family::Model, name, Descriptor::new(summary));
        }

        for (name, summary) in [
            ("softmax", "Cross-entropy over identities"),
            ("triplet", "Hard-mining triplet margin loss"),
            ("triplet_dropbatch", "Triplet loss with batch drop branch"),
            (
                "triplet_dropbatch_dropbotfeatures",
                "Triplet loss with batch drop and bottom-feature drop branches",
            ),
        ] {
            reg.register(Family::Loss, name, Descriptor::new(summary));
        }

        for (name, summary) in [
            ("RandomSampler", "Uniform random mini-batches"),
            ("SequentialSampler", "Dataset order, no shuffling"),
            ("RandomIdentitySampler", "Identity-balanced batches of K instances"),
        ] {
            reg.register(Family::Sampler, name, Descriptor::new(summary));
        }

        for (name, summary) in [
            ("random_flip", "Horizontal flip with p=0.5"),
            ("random_crop", "Pad then crop back to target size"),
            ("random_erase", "Random rectangular occlusion"),
            ("color_jitter", "Brightness/contrast/saturation jitter"),
            ("random_patch", "Paste patches pooled from other images"),
        ] {
            reg.register(Family::Transform, name, Descriptor::new(summary));
        }

        for (name, summary) in [
            ("market1501", "Market-1501 (image)"),
            ("dukemtmcreid", "DukeMTMC-reID (image)"),
            ("msmt17", "MSMT17 (image)"),
            ("cuhk03", "CUHK03 (image)"),
            ("viper", "VIPeR (image)"),
            ("grid", "GRID (image)"),
            ("mars", "MARS (video)"),
            ("ilidsvid", "iLIDS-VID (video)"),
            ("prid2011", "PRID2011 (video)"),
            ("dukemtmcvidreid", "DukeMTMC-VideoReID (video)"),
        ] {
            reg.register(Family::Dataset, name, Descriptor::new(summary));
        }

        reg
    }

    /// Register a component, replacing any previous entry with the same name.
    pub fn register(&mut self, family: Family, name: impl Into<String>, descriptor: Descriptor) {
        self.family_mut(family).insert(name.into(), descriptor);
    }

    /// Whether `name` is registered under `family`.
    pub fn contains(&self, family: Family, name: &str) -> bool {
        self.family_map(family).contains_key(name)
    }

    /// Descriptor for a registered name, if any.
    pub fn get(&self, family: Family, name: &str) -> Option<&Descriptor> {
        self.family_map(family).get(name)
    }

    /// Registered names under `family`, in sorted order.
    pub fn names(&self, family: Family) -> impl Iterator<Item = &str> {
        self.family_map(family).keys().map(String::as_str)
    }

    fn family_map(&self, family: Family) -> &BTreeMap<String, Descriptor> {
        match family {
            Family::Model => &self.models,
            Family::Loss => &self.losses,
            Family::Sampler => &self.samplers,
            Family::Transform => &self.transforms,
            Family::Dataset => &self.datasets,
        }
    }

    fn family_mut(&mut self, family: Family) -> &mut BTreeMap<String, Descriptor> {
        match family {
            Family::Model => &mut self.models,
            Family::Loss => &mut self.losses,
            Family::Sampler => &mut self.samplers,
            Family::Transform => &mut self.transforms,
            Family::Dataset => &mut self.datasets,
        }
    }
}
