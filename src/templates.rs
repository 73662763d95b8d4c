//! Starter configuration generation
//!
//! Templates are built as typed configs and serialized, so anything `init`
//! writes is guaranteed to validate.

use crate::config::schema::{
    DataConfig, ExperimentConfig, LossConfig, ModelConfig, SamplerConfig, TestConfig,
};

/// Template type for initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Framework defaults only
    Minimal,
    /// BDNet-style image run with triplet + batch-drop loss
    ImageTriplet,
    /// Video run with plain softmax loss
    VideoSoftmax,
}

/// Generate a typed starter configuration
pub fn generate_config(template: Template) -> ExperimentConfig {
    match template {
        Template::Minimal => generate_minimal(),
        Template::ImageTriplet => generate_image_triplet(),
        Template::VideoSoftmax => generate_video_softmax(),
    }
}

/// Generate a starter document as YAML text
pub fn generate_yaml(template: Template) -> String {
    generate_config(template)
        .to_yaml()
        .unwrap_or_else(|_err| "# error generating configuration".to_string())
}

fn generate_minimal() -> ExperimentConfig {
    ExperimentConfig::new(
        ModelConfig::default(),
        DataConfig::default(),
        SamplerConfig::default(),
        LossConfig::default(),
        TestConfig::default(),
    )
}

fn generate_image_triplet() -> ExperimentConfig {
    let model = ModelConfig { name: "bdnet".to_string(), ..Default::default() };

    let data = DataConfig {
        sources: vec!["market1501".to_string()],
        targets: vec!["market1501".to_string()],
        height: 384,
        width: 128,
        transforms: vec![
            "random_flip".to_string(),
            "random_crop".to_string(),
            "random_erase".to_string(),
        ],
        save_dir: "log/bdnet_market1501".to_string(),
        ..Default::default()
    };

    let sampler = SamplerConfig {
        train_sampler: "RandomIdentitySampler".to_string(),
        ..Default::default()
    };

    let loss = LossConfig { name: "triplet_dropbatch".to_string(), ..Default::default() };

    let test = TestConfig {
        batch_size: 100,
        eval_freq: 60,
        maskthr: 0.35,
        ..Default::default()
    };

    ExperimentConfig::new(model, data, sampler, loss, test)
}

fn generate_video_softmax() -> ExperimentConfig {
    let data = DataConfig {
        kind: "video".to_string(),
        sources: vec!["mars".to_string()],
        targets: vec!["mars".to_string()],
        save_dir: "log/resnet50_mars".to_string(),
        ..Default::default()
    };

    let test = TestConfig { batch_size: 100, eval_freq: 10, ..Default::default() };

    ExperimentConfig::new(
        ModelConfig::default(),
        data,
        SamplerConfig::default(),
        LossConfig::default(),
        test,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load::{parse_and_validate, LoadOptions};
    use crate::registry::Registry;
    use crate::validate::Strictness;

    #[test]
    fn test_every_template_validates_strictly() {
        let registry = Registry::builtin();
        let options = LoadOptions { strictness: Strictness::Strict, ..Default::default() };

        for template in [Template::Minimal, Template::ImageTriplet, Template::VideoSoftmax] {
            let yaml = generate_yaml(template);
            let loaded = parse_and_validate(&yaml, &registry, &options)
                .unwrap_or_else(|e| panic!("{template:?} does not validate: {e}"));
            assert_eq!(loaded.config, generate_config(template));
        }
    }

    #[test]
    fn test_image_triplet_matches_reference_run() {
        let config = generate_config(Template::ImageTriplet);
        assert_eq!(config.model().name, "bdnet");
        assert_eq!(config.data().height, 384);
        assert_eq!(config.sampler().train_sampler, "RandomIdentitySampler");
        assert_eq!(config.loss().name, "triplet_dropbatch");
        assert_eq!(config.test().eval_freq, 60);
    }

    #[test]
    fn test_video_template_is_video() {
        let config = generate_config(Template::VideoSoftmax);
        assert_eq!(config.data().kind, "video");
        assert_eq!(config.data().sources, vec!["mars"]);
    }
}
