use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

#[test]
fn part2_output_right_answer() {
    let mut cmd = Command::cargo_bin("day14_part2").unwrap();
    cmd.args(["--test", "--render"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("after 24 seconds."));
}
