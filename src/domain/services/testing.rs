//! In-memory port implementations shared by service and use case tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::domain::ports::{
    CommandOutput, FileSystem, FsError, FsResult, PipelineEvent, PipelineEventSink,
    ProcessRunner, ToolLocator,
};
use crate::domain::value_objects::CommandSpec;
use crate::error::DeployResult;

/// Runner that answers from a script and records every invocation.
///
/// Responses are matched by command-line prefix (longest prefix wins). Each
/// rule yields its queued outputs in order and then keeps repeating the last
/// one. Unmatched commands succeed with empty output.
#[derive(Default)]
pub struct ScriptedRunner {
    rules: RefCell<Vec<(String, VecDeque<CommandOutput>)>>,
    calls: RefCell<Vec<CommandSpec>>,
    /// Where a successful `go build -o <out>` writes its artifact
    build_output: Option<(Rc<MockFileSystem>, Vec<u8>)>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, prefix: &str, outputs: Vec<CommandOutput>) -> Self {
        self.rules
            .borrow_mut()
            .push((prefix.to_string(), outputs.into_iter().collect()));
        self
    }

    pub fn stdout(self, prefix: &str, stdout: &str) -> Self {
        self.respond(prefix, vec![CommandOutput::ok(stdout)])
    }

    pub fn fail(self, prefix: &str, code: i32, stderr: &str) -> Self {
        self.respond(prefix, vec![CommandOutput::failed(code, stderr)])
    }

    /// Make successful `go build -o <out>` calls write `content` to `<out>`
    pub fn builds_into(mut self, fs: Rc<MockFileSystem>, content: &[u8]) -> Self {
        self.build_output = Some((fs, content.to_vec()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.to_string()).collect()
    }

    pub fn specs(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    pub fn count_starting_with(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn next_output(&self, line: &str) -> CommandOutput {
        let mut rules = self.rules.borrow_mut();
        let best = rules
            .iter_mut()
            .filter(|(prefix, _)| line.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len());
        match best {
            Some((_, queue)) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some((_, queue)) => queue.front().cloned().unwrap_or_default(),
            None => CommandOutput::ok(""),
        }
    }
}

impl ProcessRunner for ScriptedRunner {
    fn execute(&self, command: &CommandSpec) -> DeployResult<CommandOutput> {
        self.calls.borrow_mut().push(command.clone());
        let line = command.to_string();
        let output = self.next_output(&line);
        if let Some((fs, content)) = &self.build_output {
            let args = command.get_args();
            if output.success() && command.program() == "go" && args.len() > 2 && args[1] == "-o" {
                fs.put(Path::new(&args[2]), content);
            }
        }
        Ok(output)
    }
}

/// Locator that knows a fixed set of tools
pub struct FixedLocator {
    known: HashSet<String>,
    pub lookups: RefCell<Vec<String>>,
}

impl FixedLocator {
    pub fn with(tools: &[&str]) -> Self {
        Self {
            known: tools.iter().map(|t| t.to_string()).collect(),
            lookups: RefCell::new(Vec::new()),
        }
    }
}

impl ToolLocator for FixedLocator {
    fn locate(&self, tool: &str) -> Option<PathBuf> {
        self.lookups.borrow_mut().push(tool.to_string());
        self.known
            .contains(tool)
            .then(|| PathBuf::from("/usr/bin").join(tool))
    }
}

/// In-memory file system with an operation log
#[derive(Default)]
pub struct MockFileSystem {
    pub files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    pub dirs: RefCell<HashSet<PathBuf>>,
    pub executables: RefCell<HashSet<PathBuf>>,
    pub ops: RefCell<Vec<String>>,
    temp_counter: RefCell<usize>,
    /// Flip the last byte of every file moved by `rename`
    corrupt_on_rename: bool,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: &[u8]) -> Self {
        self.files.borrow_mut().insert(path.into(), content.to_vec());
        self
    }

    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.dirs.borrow_mut().insert(path.into());
        self
    }

    pub fn corrupt_on_rename(mut self) -> Self {
        self.corrupt_on_rename = true;
        self
    }

    pub fn put(&self, path: &Path, content: &[u8]) {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_vec());
    }

    pub fn read(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    pub fn ops(&self) -> Vec<String> {
        self.ops.borrow().clone()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path) || self.dirs.borrow().contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        self.ops
            .borrow_mut()
            .push(format!("mkdir {}", path.display()));
        self.dirs.borrow_mut().insert(path.to_path_buf());
        Ok(())
    }

    fn create_temp_dir(&self, prefix: &str) -> FsResult<PathBuf> {
        let mut counter = self.temp_counter.borrow_mut();
        *counter += 1;
        let dir = PathBuf::from(format!("/tmp/{prefix}{counter}"));
        self.dirs.borrow_mut().insert(dir.clone());
        Ok(dir)
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        self.ops
            .borrow_mut()
            .push(format!("copy {} {}", from.display(), to.display()));
        let content = self
            .read(from)
            .ok_or_else(|| FsError::NotFound(from.to_path_buf()))?;
        self.put(to, &content);
        Ok(())
    }

    fn set_executable(&self, path: &Path) -> FsResult<()> {
        self.ops
            .borrow_mut()
            .push(format!("chmod 755 {}", path.display()));
        if !self.files.borrow().contains_key(path) {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        self.executables.borrow_mut().insert(path.to_path_buf());
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        self.ops
            .borrow_mut()
            .push(format!("rename {} {}", from.display(), to.display()));
        let mut content = self
            .files
            .borrow_mut()
            .remove(from)
            .ok_or_else(|| FsError::NotFound(from.to_path_buf()))?;
        if self.corrupt_on_rename {
            if let Some(last) = content.last_mut() {
                *last ^= 0xff;
            }
        }
        self.put(to, &content);
        if self.executables.borrow_mut().remove(from) {
            self.executables.borrow_mut().insert(to.to_path_buf());
        }
        Ok(())
    }

    fn hash(&self, path: &Path) -> FsResult<String> {
        use sha2::{Digest, Sha256};
        let content = self
            .read(path)
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))?;
        Ok(format!("sha256:{:x}", Sha256::digest(&content)))
    }
}

/// Event sink that keeps everything it receives
#[derive(Default)]
pub struct RecordingSink {
    pub events: RefCell<Vec<PipelineEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.borrow().clone()
    }
}

impl PipelineEventSink for RecordingSink {
    fn on_event(&self, event: PipelineEvent) {
        self.events.borrow_mut().push(event);
    }
}
