use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor, ShaderLanguage,
    ShaderType,
};

use super::render_context::RenderContextError;

/// Shared WGSL modules, registered in dependency order as
/// (source, file path).
const MODULES: &[(&str, &str)] = &[(
    include_str!("../../assets/shaders/modules/camera.wgsl"),
    "modules/camera.wgsl",
)];

/// Flat-colored geometry shader used for both lines and meshes.
pub const SCENE_SHADER: (&str, &str) = (
    include_str!("../../assets/shaders/scene.wgsl"),
    "scene.wgsl",
);

/// Composes WGSL shaders with `#import trackview::...` support.
///
/// Produces `naga::Module` IR directly so composed shaders are not re-parsed
/// by wgpu.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// [`RenderContextError::ShaderCompose`] if a shared module fails to
    /// parse.
    pub fn new() -> Result<Self, RenderContextError> {
        let mut composer = Composer::default();
        for &(source, file_path) in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source,
                    file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    RenderContextError::ShaderCompose(format!(
                        "{file_path}: {e:?}"
                    ))
                })?;
        }
        Ok(Self { composer })
    }

    /// Compose `source` into naga IR without touching the GPU.
    ///
    /// # Errors
    ///
    /// [`RenderContextError::ShaderCompose`] on unresolved imports or WGSL
    /// errors.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, RenderContextError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| {
                RenderContextError::ShaderCompose(format!("{file_path}: {e}"))
            })
    }

    /// Compose `source` into a shader module ready for pipeline creation.
    ///
    /// # Errors
    ///
    /// Same as [`compose_naga`](Self::compose_naga).
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        (source, file_path): (&str, &str),
    ) -> Result<wgpu::ShaderModule, RenderContextError> {
        let module = self.compose_naga(source, file_path)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(module)),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_shader_composes() {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer
            .compose_naga(SCENE_SHADER.0, SCENE_SHADER.1)
            .unwrap();
        let entry_points: Vec<_> =
            module.entry_points.iter().map(|ep| ep.name.as_str()).collect();
        assert!(entry_points.contains(&"vs_main"));
        assert!(entry_points.contains(&"fs_main"));
    }

    #[test]
    fn unknown_import_is_an_error() {
        let mut composer = ShaderComposer::new().unwrap();
        let err = composer
            .compose_naga("#import trackview::missing::thing\n", "bad.wgsl")
            .unwrap_err();
        assert!(matches!(err, RenderContextError::ShaderCompose(_)));
    }
}
