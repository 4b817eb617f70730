// Copyright 2025 Webmobix Solutions AG
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUTHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Spreadsheet column letters (A, B, …, Z, AA, …) to zero-based indices and back.

use crate::utils::PlannerError;

/// Decodes a column letter into a zero-based column index (A=0, Z=25, AA=26).
///
/// Decoding is case-insensitive. Anything other than the letters A–Z, including
/// an empty string, is rejected with [`PlannerError::InvalidColumnName`].
pub fn decode(letters: &str) -> Result<usize, PlannerError> {
    if letters.is_empty() {
        return Err(PlannerError::InvalidColumnName(letters.to_string()));
    }

    let mut number: usize = 0;
    for c in letters.chars() {
        let upper = c.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return Err(PlannerError::InvalidColumnName(letters.to_string()));
        }
        let digit = (upper as u8 - b'A') as usize + 1;
        number = number
            .checked_mul(26)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(|| PlannerError::InvalidColumnName(letters.to_string()))?;
    }

    Ok(number - 1)
}

/// Converts a zero-based column index to a column letter (0=A, 25=Z, 26=AA, ...).
pub fn encode(index: usize) -> String {
    let mut result = String::new();
    let mut n = index;

    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_single_and_double_letters() {
        assert_eq!(decode("A").unwrap(), 0);
        assert_eq!(decode("G").unwrap(), 6);
        assert_eq!(decode("Z").unwrap(), 25);
        assert_eq!(decode("AA").unwrap(), 26);
        assert_eq!(decode("AZ").unwrap(), 51);
        assert_eq!(decode("ZZ").unwrap(), 701);
        assert_eq!(decode("AAA").unwrap(), 702);
    }

    #[test]
    fn decode_is_case_insensitive() {
        assert_eq!(decode("g").unwrap(), decode("G").unwrap());
        assert_eq!(decode("aB").unwrap(), decode("AB").unwrap());
    }

    #[test]
    fn decode_rejects_non_letters() {
        for input in ["", "A1", "B-", " C", "É"] {
            match decode(input) {
                Err(PlannerError::InvalidColumnName(name)) => assert_eq!(name, input),
                other => panic!("expected InvalidColumnName for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn encode_matches_sheet_letters() {
        assert_eq!(encode(0), "A");
        assert_eq!(encode(25), "Z");
        assert_eq!(encode(26), "AA");
        assert_eq!(encode(701), "ZZ");
        assert_eq!(encode(702), "AAA");
    }

    #[test]
    fn decode_inverts_encode() {
        for n in 0..=1000 {
            assert_eq!(decode(&encode(n)).unwrap(), n);
            assert_eq!(decode(&encode(n).to_lowercase()).unwrap(), n);
        }
    }
}
