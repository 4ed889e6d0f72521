mod support;

use automation::{
    FailurePolicy, SessionDriver, SessionError, SessionReport,
    pipeline::{
        NOT_FOUND_NOTICE,
        gimp::{GimpPatterns, cleanup_pipeline, export_pipeline},
    },
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use support::{Action, Harness, ScriptedOpener};
use vision::Region;

fn gimp_screen(h: &mut Harness, p: &GimpPatterns) {
    let rows = [
        &p.file_menu,
        &p.export_as,
        &p.parent_folder,
        &p.output_folder,
        &p.file_type_toggle,
        &p.png_entry,
        &p.export_button,
        &p.quit,
    ];
    for (i, pattern) in rows.into_iter().enumerate() {
        h.oracle.show(pattern, Region::new(10, 40 * i as i32, 30, 20));
    }
    h.oracle.show(&p.file_type_list, Region::new(400, 600, 200, 150));
    h.oracle.show(&p.file_type_scrollbar, Region::new(610, 610, 12, 40));
}

fn inputs(names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|n| PathBuf::from("/pictures/Input").join(n))
        .collect()
}

fn is_step_line(line: &str) -> bool {
    line.starts_with("\t ")
}

#[test]
fn three_files_all_exported() {
    let patterns = GimpPatterns::in_dir("images");
    let (convert, cleanup) = (export_pipeline(&patterns), cleanup_pipeline(&patterns));
    let mut h = Harness::default();
    gimp_screen(&mut h, &patterns);
    let mut opener = ScriptedOpener::default();
    let files = inputs(&["a.psd", "b.psd", "c.psd"]);

    let report = h
        .with_ctx(|ctx| SessionDriver::new(&mut opener, &convert, &cleanup).run(ctx, &files))
        .expect("no open failures");

    assert_eq!(
        report,
        SessionReport {
            exported: vec!["a.psd".into(), "b.psd".into(), "c.psd".into()],
            failed: vec![],
        }
    );
    assert_eq!(opener.opened, vec!["a.psd", "b.psd", "c.psd"]);

    let lines = h.stdout.lines();
    let summaries: Vec<&String> = lines.iter().filter(|l| !is_step_line(l)).collect();
    assert_eq!(
        summaries,
        vec![
            "Opened a.psd",
            "Exported a.psd",
            "Opened b.psd",
            "Exported b.psd",
            "Opened c.psd",
            "Exported c.psd",
        ]
    );
    // 每个文件 9 步，最后是 2 步清理。
    let per_file: Vec<usize> = lines
        .split(|l| l.starts_with("Exported"))
        .map(|chunk| chunk.iter().filter(|l| is_step_line(l)).count())
        .collect();
    assert_eq!(per_file, vec![9, 9, 9, 2]);
    assert_eq!(h.actuator.actions.len(), 3 * 9 + 2);
    assert_eq!(h.stderr.text(), "");
}

#[test]
fn no_files_still_runs_cleanup_once() {
    let patterns = GimpPatterns::in_dir("images");
    let (convert, cleanup) = (export_pipeline(&patterns), cleanup_pipeline(&patterns));
    let mut h = Harness::default();
    gimp_screen(&mut h, &patterns);
    let mut opener = ScriptedOpener::default();

    let report = h
        .with_ctx(|ctx| SessionDriver::new(&mut opener, &convert, &cleanup).run(ctx, &[]))
        .expect("nothing to open");

    assert_eq!(report, SessionReport::default());
    assert_eq!(h.oracle.queried(), vec!["file_menu", "quit"]);
    assert_eq!(
        h.stdout.lines(),
        vec!["\t Clicked file drop down.", "\t Clicked to close GIMP."]
    );
}

#[test]
fn cleanup_tries_every_step_under_abort_policy() {
    let patterns = GimpPatterns::in_dir("images");
    let (convert, cleanup) = (export_pipeline(&patterns), cleanup_pipeline(&patterns));
    let mut h = Harness::default();
    h.config.on_step_failure = FailurePolicy::AbortFile;
    h.oracle.show(&patterns.quit, Region::new(10, 40, 30, 20));
    let mut opener = ScriptedOpener::default();

    let report = h
        .with_ctx(|ctx| SessionDriver::new(&mut opener, &convert, &cleanup).run(ctx, &[]))
        .expect("nothing to open");

    assert_eq!(report, SessionReport::default());
    assert_eq!(h.oracle.queried(), vec!["file_menu", "quit"]);
    assert_eq!(h.stdout.lines(), vec!["\t Clicked to close GIMP."]);
    assert_eq!(h.stderr.lines(), vec![NOT_FOUND_NOTICE]);
}

#[test]
fn open_failure_stops_everything_without_cleanup() {
    let patterns = GimpPatterns::in_dir("images");
    let (convert, cleanup) = (export_pipeline(&patterns), cleanup_pipeline(&patterns));
    let mut h = Harness::default();
    gimp_screen(&mut h, &patterns);
    let mut opener = ScriptedOpener::default();
    opener.refuse("b.psd");
    let files = inputs(&["a.psd", "b.psd", "c.psd"]);

    let err = h
        .with_ctx(|ctx| SessionDriver::new(&mut opener, &convert, &cleanup).run(ctx, &files))
        .unwrap_err();

    assert!(matches!(&err, SessionError::Open { path, .. } if path.ends_with("b.psd")));
    assert_eq!(opener.opened, vec!["a.psd", "b.psd"]);
    assert_eq!(h.actuator.actions.len(), 9);
    assert!(
        !h.oracle.queried().contains(&"quit"),
        "cleanup must not run after an open failure"
    );
    assert_eq!(
        h.stderr.lines(),
        vec![
            "Cannot open file of the name b.psd with default application.",
            "Exiting program.",
        ]
    );
    assert!(!h.stdout.text().contains("Opened b.psd"));
}

#[test]
fn failing_first_file_does_not_taint_the_next() {
    let patterns = GimpPatterns::in_dir("images");
    let (convert, cleanup) = (export_pipeline(&patterns), cleanup_pipeline(&patterns));
    let mut h = Harness::default();
    gimp_screen(&mut h, &patterns);
    h.oracle.miss_next(&patterns.png_entry, 1);
    let mut opener = ScriptedOpener::default();
    let files = inputs(&["a.psd", "b.psd"]);

    let report = h
        .with_ctx(|ctx| SessionDriver::new(&mut opener, &convert, &cleanup).run(ctx, &files))
        .expect("no open failures");

    assert_eq!(report.failed, vec!["a.psd".to_string()]);
    assert_eq!(report.exported, vec!["b.psd".to_string()]);
    assert!(h.stdout.lines().contains(&"Failed with a.psd".to_string()));
    assert_eq!(h.stderr.lines(), vec![NOT_FOUND_NOTICE]);
    // 失败文件的剩余步骤仍然执行了。
    assert_eq!(
        h.actuator
            .actions
            .iter()
            .filter(|a| matches!(a, Action::Click { pattern, .. } if pattern == "export_button"))
            .count(),
        4
    );
}
