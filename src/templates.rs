//! Starter files written for each new day.

use crate::day::Day;

const DAY_PLACEHOLDER: &str = "{{DAY}}";

const SOLUTION: &str = r#"import { readInput, readLines } from '../utils/input';

const day = '{{DAY}}';

function part1(input: string): number {
    // TODO: Implement part 1
    return 0;
}

function part2(input: string): number {
    // TODO: Implement part 2
    return 0;
}

if (import.meta.main) {
    const input = readInput(day);
    console.log(`Day ${day} Part 1: ${part1(input)}`);
    console.log(`Day ${day} Part 2: ${part2(input)}`);
}

export { part1, part2 };
"#;

const TEST: &str = r#"import { describe, expect, test } from "bun:test";
import { readInput } from '../utils/input';
import { part1, part2 } from './solution';

const day = '{{DAY}}';

describe('Day {{DAY}}', () => {
    const example = `EXAMPLE_INPUT_HERE`;  // Replace with example input

    test('part 1 - example', () => {
        expect(part1(example)).toBe(0);  // Replace with expected result
    });

    test('part 1 - input', () => {
        const input = readInput(day);
        expect(part1(input)).toBe(0);  // Replace with expected result
    });

    test('part 2 - example', () => {
        expect(part2(example)).toBe(0);  // Replace with expected result
    });

    test('part 2 - input', () => {
        const input = readInput(day);
        expect(part2(input)).toBe(0);  // Replace with expected result
    });
});
"#;

/// Shared by every day, written once.
pub const INPUT_HELPER: &str = r#"import { readFileSync } from "fs";
import { join } from "path";

export function readInput(day: string): string {
  const inputPath = join(process.cwd(), "src", `day${day}`, "input.txt");
  return readFileSync(inputPath, "utf-8").trim();
}

export function readLines(day: string): string[] {
  return readInput(day).split("\n");
}

export function readNumbers(day: string): number[] {
  return readLines(day).map(Number);
}
"#;

pub fn solution(day: Day) -> String {
    SOLUTION.replace(DAY_PLACEHOLDER, &day.padded())
}

pub fn test(day: Day) -> String {
    TEST.replace(DAY_PLACEHOLDER, &day.padded())
}
