use anyhow::{bail, Context, Result};
use glob::glob;
use std::fs::{read_to_string, write};
use std::path::PathBuf;

struct ShaderData {
    src: String,
    src_path: PathBuf,
    spv_path: PathBuf,
    kind: shaderc::ShaderKind,
}

impl ShaderData {
    fn load(src_path: PathBuf) -> Result<Self> {
        let extension = src_path
            .extension()
            .context("shader file is missing an extension")?
            .to_str()
            .context("shader extension is not valid utf-8")?;
        let kind = match extension {
            "vert" => shaderc::ShaderKind::Vertex,
            "frag" => shaderc::ShaderKind::Fragment,
            _ => bail!("unsupported shader extension: {}", extension),
        };

        let src = read_to_string(&src_path)?;
        let spv_path = src_path.with_extension(format!("{}.spv", extension));

        Ok(Self {
            src,
            src_path,
            spv_path,
            kind,
        })
    }
}

fn main() -> Result<()> {
    let mut shader_paths = Vec::new();
    shader_paths.extend(glob("./src/**/*.vert")?);
    shader_paths.extend(glob("./src/**/*.frag")?);

    let mut compiler = shaderc::Compiler::new().context("unable to create shader compiler")?;

    for entry in shader_paths {
        let shader = ShaderData::load(entry?)?;
        let src_path = shader
            .src_path
            .to_str()
            .context("shader path is not valid utf-8")?;

        println!("cargo:rerun-if-changed={}", src_path);

        let compiled =
            compiler.compile_into_spirv(&shader.src, shader.kind, src_path, "main", None)?;
        write(&shader.spv_path, compiled.as_binary_u8())?;
    }

    Ok(())
}
