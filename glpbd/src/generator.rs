use crate::{
    BoundingBox, GridStep, ModelContainer, ParameterIo, Platform, ProbeBox, Result, SchemaVersion,
    Settings, param::DocumentBuilder,
};

/// Builds a light probe document covering a volume with a single uniform
/// probe box lit by the constant color from [`Settings`].
#[derive(Debug, Clone, Copy)]
pub struct ProbeGenerator {
    version: SchemaVersion,
}

impl ProbeGenerator {
    pub fn new(version: SchemaVersion) -> Self {
        Self { version }
    }

    pub fn for_platform(platform: Platform) -> Self {
        Self::new(platform.schema_version())
    }

    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    /// Generates at the coarse [`GridStep::COARSE`] spacing.
    pub fn generate(&self, bounds: &BoundingBox, settings: &Settings) -> Result<ParameterIo> {
        self.generate_with_step(bounds, GridStep::COARSE, settings)
    }

    pub fn generate_with_step(
        &self,
        bounds: &BoundingBox,
        step: GridStep,
        settings: &Settings,
    ) -> Result<ParameterIo> {
        let probe_box = ProbeBox::constant_color(0, *bounds, step, settings.color)?;

        let mut builder = DocumentBuilder::new(self.version);
        builder.push_box(&probe_box)?;

        let pio = builder.build(bounds, step, settings)?;

        log::info!(
            "Built {} probe document over {} with step {}",
            self.version,
            bounds,
            step
        );
        log::debug!("{}", pio.root());

        Ok(pio)
    }

    pub fn generate_from_container<C: ModelContainer + ?Sized>(
        &self,
        container: &C,
        settings: &Settings,
    ) -> Result<ParameterIo> {
        let bounds = container.bounds()?;
        self.generate(&bounds, settings)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::{
        Error,
        io::{Obj, ObjContainer},
        param::{ParameterValue, schema},
        sh,
    };

    #[test]
    fn test_generate_single_box() {
        let bounds = BoundingBox::with_min_max(Vec3::ZERO, Vec3::new(2000.0, 1000.0, 500.0));
        let pio = ProbeGenerator::new(SchemaVersion::V2)
            .generate(&bounds, &Settings::default())
            .unwrap();

        schema::validate(&pio).unwrap();

        let list = pio.root().list("b_0").unwrap();
        let index_buffer = list.object(schema::SH_INDEX_BUFFER).unwrap();

        assert_eq!(index_buffer.get("used_index_num"), Some(&ParameterValue::Int(16)));
        assert_eq!(
            index_buffer.get("index_buffer").and_then(|v| v.as_u32_buffer()),
            Some(&[0u32; 8][..])
        );
    }

    #[test]
    fn test_settings_color_reaches_data_buffer() {
        let settings = Settings {
            color: Vec3::new(0.9, 0.7, 0.5),
            ..Default::default()
        };
        let bounds = BoundingBox::with_min_max(Vec3::ZERO, Vec3::ONE);
        let pio = ProbeGenerator::new(SchemaVersion::V1)
            .generate(&bounds, &settings)
            .unwrap();

        let data = pio
            .root()
            .list("b_0")
            .and_then(|list| list.object(schema::SH_DATA_BUFFER))
            .and_then(|object| object.get("data_buffer"))
            .and_then(|value| value.as_f32_buffer())
            .unwrap();

        let data: sh::ShBuffer = data.try_into().unwrap();
        assert_eq!(sh::decode_constant_color(&data), settings.color);
    }

    #[test]
    fn test_root_grid_matches_box_grid() {
        let bounds = BoundingBox::with_min_max(Vec3::splat(-300.0), Vec3::splat(700.0));
        let step = GridStep::new(Vec3::splat(250.0)).unwrap();
        let pio = ProbeGenerator::new(SchemaVersion::V2)
            .generate_with_step(&bounds, step, &Settings::default())
            .unwrap();

        let root_grid = pio.root().object(schema::ROOT_GRID).unwrap();
        let box_grid = pio.root().list("b_0").unwrap().object(schema::GRID).unwrap();

        assert_eq!(root_grid.parameters().len(), 3);
        assert_eq!(
            root_grid.parameters().map(|(_, v)| v).collect::<Vec<_>>(),
            box_grid.parameters().map(|(_, v)| v).collect::<Vec<_>>()
        );
        assert_eq!(
            root_grid.get("voxel_step_pos"),
            Some(&ParameterValue::Vec3(Vec3::splat(250.0)))
        );
    }

    #[test]
    fn test_platform_selects_version() {
        assert_eq!(
            ProbeGenerator::for_platform(Platform::WiiU).version(),
            SchemaVersion::V1
        );
        assert_eq!(
            ProbeGenerator::for_platform(Platform::Switch).version(),
            SchemaVersion::V2
        );
    }

    #[test]
    fn test_empty_container() {
        let container = ObjContainer::new(Obj::default(), Platform::WiiU);
        let result = ProbeGenerator::for_platform(container.platform())
            .generate_from_container(&container, &Settings::default());

        assert!(matches!(result, Err(Error::NoGeometryData)));
    }

    #[test]
    fn test_far_apart_vertices_are_too_large() {
        let container = crate::io::load_geometry_container(b"v 0 0 0\nv 1e10 1e10 1e10\n").unwrap();
        let result = ProbeGenerator::for_platform(container.platform())
            .generate_from_container(&container, &Settings::default());

        assert!(matches!(result, Err(Error::DocumentTooLarge(_))));
    }
}
