use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

#[test]
fn part2_output_right_answer() {
    let mut cmd = Command::cargo_bin("day11_part2").unwrap();
    cmd.args(["--test", "--blinks", "6"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("There are 22 stones"));
}
