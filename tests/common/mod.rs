#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use resbuild::{Error, ProcessRunner, ToolExit, ToolPaths};

pub const RESGEN: &str = "fake/ResGen.exe";
pub const CSC: &str = "fake/csc.exe";
pub const AL: &str = "fake/al.exe";

pub fn fake_paths() -> ToolPaths {
    ToolPaths {
        sdk_dir: PathBuf::from("fake"),
        resgen: PathBuf::from(RESGEN),
        csc: PathBuf::from(CSC),
        al: PathBuf::from(AL),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Value of the first `/{flag}:` argument.
    pub fn flag(&self, flag: &str) -> Option<&str> {
        let prefix = format!("/{}:", flag);
        self.args.iter().find_map(|a| a.strip_prefix(prefix.as_str()))
    }

    /// Values of every `/{flag}:` argument.
    pub fn flags(&self, flag: &str) -> Vec<&str> {
        let prefix = format!("/{}:", flag);
        self.args
            .iter()
            .filter_map(|a| a.strip_prefix(prefix.as_str()))
            .collect()
    }

    /// Arguments that are not `/switch` or `/flag:value` switches.
    pub fn positional(&self) -> Vec<&str> {
        self.args
            .iter()
            .filter(|a| !is_switch(a))
            .map(String::as_str)
            .collect()
    }
}

fn is_switch(arg: &str) -> bool {
    match arg.strip_prefix('/') {
        Some(rest) => {
            let name = rest.split(':').next().unwrap_or_default();
            !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

/// Stands in for ResGen, csc and al by writing the files they would produce.
#[derive(Default)]
pub struct FakeRunner {
    pub invocations: RefCell<Vec<Invocation>>,
    pub fail_resgen: Cell<bool>,
    pub fail_compile: Cell<bool>,
    pub fail_link: Cell<bool>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls_to(&self, program: &str) -> Vec<Invocation> {
        self.invocations
            .borrow()
            .iter()
            .filter(|i| i.program == program)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.invocations.borrow_mut().clear();
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<ToolExit, Error> {
        let invocation = Invocation {
            program: program.to_string_lossy().into_owned(),
            args: args
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect(),
        };
        self.invocations.borrow_mut().push(invocation.clone());

        let failed = match invocation.program.as_str() {
            RESGEN => {
                if !self.fail_resgen.get() {
                    let positional = invocation.positional();
                    fs::write(positional[1], format!("compiled {}", positional[0]))?;
                    if let Some(spec) = invocation.flag("str") {
                        let path = spec.splitn(4, ',').nth(3).unwrap();
                        fs::write(path, "public class Generated {}")?;
                    }
                }
                self.fail_resgen.get()
            }
            CSC => {
                if !self.fail_compile.get() {
                    fs::write(invocation.flag("out").unwrap(), b"library")?;
                }
                self.fail_compile.get()
            }
            AL => {
                if !self.fail_link.get() {
                    fs::write(invocation.flag("out").unwrap(), b"satellite")?;
                }
                self.fail_link.get()
            }
            other => panic!("unexpected program {}", other),
        };

        Ok(ToolExit {
            code: Some(if failed { 1 } else { 0 }),
        })
    }
}

/// Names of the files directly inside `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned()
}
