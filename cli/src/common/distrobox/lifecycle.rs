//! # Container Lifecycle Commands
//!
//! File: cli/src/common/distrobox/lifecycle.rs
//!
//! Builds the argument vectors for every captured command boxctl sends to the
//! tool. Keeping them here, free of I/O, means the exact wire contract with the
//! tool can be tested without running it:
//!
//! | Operation       | Arguments                                                 |
//! |-----------------|-----------------------------------------------------------|
//! | list            | `list --no-color`                                         |
//! | create          | `create -n NAME -i IMAGE -Y [--init --additional-packages systemd] [--home DIR] [--volume V]...` |
//! | remove          | `rm NAME --force`                                         |
//! | export          | `enter BOX -- <helper> --app APP [--delete]`              |
//! | find launchers  | `enter BOX -- find DIR -name *.desktop`                   |
//! | image catalog   | `create -C`                                               |
//! | assemble        | `assemble create --file PATH`                             |
//!
use super::CreateOptions;
use std::path::Path;

fn argv(program: &str, args: &[&str]) -> Vec<String> {
    std::iter::once(program)
        .chain(args.iter().copied())
        .map(str::to_string)
        .collect()
}

pub fn list_args(program: &str) -> Vec<String> {
    argv(program, &["list", "--no-color"])
}

pub fn create_args(program: &str, options: &CreateOptions) -> Vec<String> {
    let mut args = argv(
        program,
        &["create", "-n", &options.name, "-i", &options.image, "-Y"],
    );
    if options.init {
        args.extend(
            ["--init", "--additional-packages", "systemd"]
                .iter()
                .map(|s| s.to_string()),
        );
    }
    if let Some(home) = options.home.as_deref().filter(|h| !h.is_empty()) {
        args.push("--home".to_string());
        args.push(home.to_string());
    }
    for volume in &options.volumes {
        args.push("--volume".to_string());
        args.push(volume.clone());
    }
    args
}

pub fn remove_args(program: &str, box_name: &str) -> Vec<String> {
    argv(program, &["rm", box_name, "--force"])
}

pub fn export_args(program: &str, helper: &str, box_name: &str, app_name: &str, delete: bool) -> Vec<String> {
    let mut args = argv(program, &["enter", box_name, "--", helper, "--app", app_name]);
    if delete {
        args.push("--delete".to_string());
    }
    args
}

pub fn find_launchers_args(program: &str, box_name: &str, dir: &str) -> Vec<String> {
    argv(
        program,
        &["enter", box_name, "--", "find", dir, "-name", "*.desktop"],
    )
}

pub fn catalog_args(program: &str) -> Vec<String> {
    argv(program, &["create", "-C"])
}

pub fn assemble_args(program: &str, file: &Path) -> Vec<String> {
    let mut args = argv(program, &["assemble", "create", "--file"]);
    args.push(file.to_string_lossy().into_owned());
    args
}
