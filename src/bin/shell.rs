use std::io::{BufRead, Write as _};

use log::{debug, info};

use kvisl::arena::NodeKind;
use kvisl::fs::{Filesystem, Result, Session};

const NODE_CAPACITY_DEFAULT: usize = 128;

const COMMANDS: [(&str, &str); 14] = [
    ("cat", "Print file content"),
    ("cd", "Change the working directory"),
    ("cp", "Copy a file"),
    ("echo", "Print text, or redirect it with > or >>"),
    ("exit", "Leave the shell"),
    ("help", "Show this help"),
    ("ls", "List a directory"),
    ("mkdir", "Create a directory"),
    ("mv", "Rename a file or directory"),
    ("pwd", "Print the working directory"),
    ("rm", "Remove a file or directory"),
    ("touch", "Create an empty file"),
    ("tree", "Print the tree under a directory"),
    ("write", "Replace file content"),
];

fn usage() -> ! {
    eprintln!("shell [node-capacity]");
    std::process::exit(1);
}

fn main() {
    env_logger::init();

    let mut capacity = None;
    let args = std::env::args().skip(1);
    for arg in args {
        if capacity.is_none() {
            match arg.parse() {
                Ok(value) => capacity = Some(value),
                Err(_) => {
                    eprintln!("shell: invalid node capacity {arg}");
                    usage();
                }
            }
        } else {
            eprintln!("shell: too many arguments");
            usage();
        }
    }
    let capacity = capacity.unwrap_or(NODE_CAPACITY_DEFAULT);

    let (mut fs, mut session) = startup(capacity);
    info!(
        "shell ready, {} of {} node slots in use",
        fs.arena().len(),
        fs.arena().capacity()
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} $ ", session.current_path());
        stdout.flush().expect("stdout must accept the prompt");

        let Some(Ok(line)) = lines.next() else {
            break;
        };
        if !dispatch(&mut fs, &mut session, &line) {
            break;
        }
    }
}

/// Builds the standard layout: the top-level directories, one file in /bin
/// per shell command, and a session positioned in /home.
fn startup(capacity: usize) -> (Filesystem, Session) {
    let mut fs = Filesystem::new(capacity);
    let mut session = Session::new(&fs);

    for dir in ["bin", "dev", "home", "mnt"] {
        fs.make_directory(&session, dir)
            .expect("fresh tree accepts the standard layout");
    }
    for (name, _) in COMMANDS {
        fs.create_file(&session, &format!("bin/{name}"))
            .expect("fresh /bin accepts one file per command");
    }
    session
        .change_directory(&fs, "/home")
        .expect("/home was just created");

    (fs, session)
}

fn dispatch(fs: &mut Filesystem, session: &mut Session, line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return true;
    }
    debug!("dispatch {line:?}");

    let (command, args) = match line.split_once(' ') {
        Some((command, args)) => (command, args.trim()),
        None => (line, ""),
    };

    match command {
        "help" => help(),
        "pwd" => println!("{}", session.current_path()),
        "ls" => list(fs, session, args),
        "cd" => report("cd", session.change_directory(fs, args)),
        "mkdir" => report("mkdir", fs.make_directory(session, args).map(drop)),
        "touch" => report("touch", fs.create_file(session, args).map(drop)),
        "rm" => report("rm", fs.remove(session, args).map(drop)),
        "write" => {
            let (path, text) = match args.split_once(' ') {
                Some((path, text)) => (path, text),
                None => (args, ""),
            };
            report("write", fs.write(session, path, text.as_bytes()));
        }
        "cat" => match fs.read(session, args) {
            Ok(content) if content.is_empty() => println!("(empty)"),
            Ok(content) => println!("{}", String::from_utf8_lossy(content)),
            Err(e) => eprintln!("shell: cat: {e}"),
        },
        "echo" => echo(fs, session, args),
        "cp" => copy(fs, session, args),
        "mv" => rename(fs, session, args),
        "tree" => tree(fs, session, args),
        "exit" => return false,
        _ => eprintln!("shell: unknown command {command}"),
    }
    true
}

fn report(command: &str, result: Result<()>) {
    if let Err(e) = result {
        eprintln!("shell: {command}: {e}");
    }
}

fn help() {
    for (name, description) in COMMANDS {
        println!("{name:<8}{description}");
    }
}

fn list(fs: &Filesystem, session: &Session, args: &str) {
    let target = if args.is_empty() {
        Ok(session.current())
    } else {
        fs.resolve(args, session.current())
    };

    match target.and_then(|dir| fs.list(dir)) {
        Ok(entries) => {
            for entry in entries {
                match entry.kind {
                    NodeKind::Dir => println!("{}/", entry.name),
                    NodeKind::File => println!("{}", entry.name),
                }
            }
        }
        Err(e) => eprintln!("shell: ls: {e}"),
    }
}

fn echo(fs: &mut Filesystem, session: &Session, args: &str) {
    let (text, target, append) = if let Some((text, path)) = args.split_once(">>") {
        (text.trim(), Some(path.trim()), true)
    } else if let Some((text, path)) = args.split_once('>') {
        (text.trim(), Some(path.trim()), false)
    } else {
        (args, None, false)
    };

    let Some(path) = target else {
        println!("{text}");
        return;
    };
    if path.is_empty() {
        eprintln!("shell: echo: missing redirect target");
        return;
    }

    if let Err(e) = echo_redirect(fs, session, path, text, append) {
        eprintln!("shell: echo: {e}");
    }
}

/// `>>` composed from the core primitives: read, concatenate, write. The
/// core itself has no append operation.
fn echo_redirect(
    fs: &mut Filesystem,
    session: &Session,
    path: &str,
    text: &str,
    append: bool,
) -> Result<()> {
    if append && let Ok(existing) = fs.read(session, path) {
        let mut combined = existing.to_vec();
        combined.extend_from_slice(text.as_bytes());
        return fs.write(session, path, &combined);
    }

    if fs.resolve(path, session.current()).is_err() {
        fs.create_file(session, path)?;
    }
    fs.write(session, path, text.as_bytes())
}

fn copy(fs: &mut Filesystem, session: &Session, args: &str) {
    let Some((src, dest)) = split_pair(args) else {
        eprintln!("shell: usage: cp <src> <dest>");
        return;
    };

    let result = (|| {
        let content = fs.read(session, src)?.to_vec();
        if fs.resolve(dest, session.current()).is_err() {
            fs.create_file(session, dest)?;
        }
        fs.write(session, dest, &content)
    })();
    if let Err(e) = result {
        eprintln!("shell: cp: {e}");
    }
}

fn rename(fs: &mut Filesystem, session: &Session, args: &str) {
    let Some((src, dest)) = split_pair(args) else {
        eprintln!("shell: usage: mv <src> <dest>");
        return;
    };

    // The last segment of the destination becomes the new name.
    match dest.rsplit('/').find(|segment| !segment.is_empty()) {
        Some(name) => report("mv", fs.rename(session, src, name)),
        None => eprintln!("shell: mv: invalid destination"),
    }
}

fn tree(fs: &Filesystem, session: &Session, args: &str) {
    let target = if args.is_empty() {
        Ok(session.current())
    } else {
        fs.resolve(args, session.current())
    };

    match target {
        Ok(dir) if fs.node(dir).kind() == NodeKind::Dir => print_tree(fs, dir, 0),
        Ok(_) => eprintln!("shell: tree: {}", kvisl::fs::Error::NotADirectory),
        Err(e) => eprintln!("shell: tree: {e}"),
    }
}

fn print_tree(fs: &Filesystem, dir: kvisl::arena::NodeId, depth: usize) {
    for &child in fs.node(dir).children() {
        let node = fs.node(child);
        let indent = "  ".repeat(depth);
        match node.kind() {
            NodeKind::Dir => {
                println!("{indent}{}/", node.name());
                print_tree(fs, child, depth + 1);
            }
            NodeKind::File => println!("{indent}{}", node.name()),
        }
    }
}

fn split_pair(args: &str) -> Option<(&str, &str)> {
    let (first, second) = args.split_once(' ')?;
    let second = second.trim();
    if first.is_empty() || second.is_empty() {
        return None;
    }
    Some((first, second))
}
