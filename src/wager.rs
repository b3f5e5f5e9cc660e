use thiserror::Error;

use crate::api::*;

/// Errors from turning an input line into a request payload.
///
/// Parsing stops on the first bad token. The error carries the offending
/// input so the operator can find and fix the line in the file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WagerError {
    #[error("malformed wager input {input:?}: {reason}")]
    MalformedInput { input: String, reason: String },
    #[error("system size does not fit in 64 bits")]
    Overflow,
}
impl WagerError {
    fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
    /// Re-anchors a token error on the full line it came from.
    fn for_line(self, line: &str) -> Self {
        match self {
            Self::MalformedInput { reason, .. } => Self::MalformedInput {
                input: line.to_string(),
                reason,
            },
            Self::Overflow => Self::Overflow,
        }
    }
}

/// Either of the two payloads a line can encode into.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedRequest {
    Wager(WagerRequest),
    Winshare(WinshareRequest),
}

impl MatchSelection {
    /// Number of outcome combinations this single match contributes.
    pub fn option_count(&self) -> u64 {
        match self {
            Self::Outcomes { outcomes } => outcomes.len() as u64,
            Self::Scores { home, away } => home.len() as u64 * away.len() as u64,
        }
    }
}

/// Parses one `;`-separated match token into its selected outcomes.
pub fn parse_selection(token: &str, game: Game) -> Result<MatchSelection, WagerError> {
    match game {
        Game::Sport => parse_outcome_marks(token),
        Game::Multiscore => parse_score_candidates(token),
    }
}

/// Parses a whole input line into the ordered selections of one board.
pub fn parse_line(line: &str, game: Game) -> Result<Vec<MatchSelection>, WagerError> {
    let mut selections = Vec::new();
    for token in line.split(';') {
        selections.push(parse_selection(token, game).map_err(|e| e.for_line(line))?);
    }
    Ok(selections)
}

fn parse_outcome_marks(token: &str) -> Result<MatchSelection, WagerError> {
    let mut outcomes = Vec::new();
    for mark in token.chars() {
        let outcome = match mark {
            '\r' | '\n' => continue,
            '1' => Outcome::Home,
            'x' | 'X' => Outcome::Tie,
            '2' => Outcome::Away,
            other => {
                return Err(WagerError::malformed(
                    token,
                    format!("unknown outcome mark {:?}, expected 1, x or 2", other),
                ))
            }
        };
        // a repeated mark selects nothing new, and duplicates would inflate
        // the system size
        if !outcomes.contains(&outcome) {
            outcomes.push(outcome);
        }
    }
    if outcomes.is_empty() {
        return Err(WagerError::malformed(token, "match has no selected outcome"));
    }
    Ok(MatchSelection::Outcomes { outcomes })
}

fn parse_score_candidates(token: &str) -> Result<MatchSelection, WagerError> {
    let trimmed = token.trim_end_matches(['\r', '\n']);
    let mut sides = trimmed.split('-');
    let (Some(home), Some(away), None) = (sides.next(), sides.next(), sides.next()) else {
        return Err(WagerError::malformed(
            token,
            "expected exactly one - between home and away scores",
        ));
    };
    Ok(MatchSelection::Scores {
        home: parse_score_list(token, home)?,
        away: parse_score_list(token, away)?,
    })
}

fn parse_score_list(token: &str, list: &str) -> Result<Vec<u32>, WagerError> {
    let mut scores = Vec::new();
    for candidate in list.split(',') {
        let score = candidate.parse::<u32>().map_err(|_| {
            WagerError::malformed(
                token,
                format!("score candidate {:?} is not a non-negative integer", candidate),
            )
        })?;
        if !scores.contains(&score) {
            scores.push(score);
        }
    }
    Ok(scores)
}

/// Number of distinct outcome combinations a board covers, the product of
/// the per-match option counts. Checked so that large multiscore systems
/// fail loudly instead of wrapping.
pub fn compute_system_size(selections: &[MatchSelection]) -> Result<u64, WagerError> {
    let mut size: u64 = 1;
    for selection in selections {
        size = size
            .checked_mul(selection.option_count())
            .ok_or(WagerError::Overflow)?;
    }
    Ok(size)
}

/// Bet type label the platform expects on a board. Size 1 is a regular
/// single-line bet, anything larger is a system bet with a game-specific
/// prefix.
pub fn classify_bet(game: Game, system_size: u64) -> String {
    match (game, system_size) {
        (_, 1) => "Regular".to_string(),
        (Game::Sport, size) => format!("FREE {}", size),
        (Game::Multiscore, size) => format!("FULL {}", size),
    }
}

// Sport declares the unit stake as its price, multiscore declares the full
// system price. The platform prices each game differently and both rules
// have to be kept as-is.
fn sport_price(stake: u64, system_size: u64, additional_prize_tier: bool) -> Result<u64, WagerError> {
    if additional_prize_tier {
        stake
            .checked_mul(system_size)
            .and_then(|price| price.checked_mul(2))
            .ok_or(WagerError::Overflow)
    } else {
        Ok(stake)
    }
}

fn multiscore_price(stake: u64, system_size: u64) -> Result<u64, WagerError> {
    stake.checked_mul(system_size).ok_or(WagerError::Overflow)
}

/// Builds a single-board wager request for the given draw list.
///
/// A stake of 0 means the caller is not putting money down, so the line
/// turns into a winshare lookup instead. Callers that know they want
/// winshares should call [`encode_winshare`] directly.
pub fn encode_wager(
    game: Game,
    list_index: u32,
    stake: u64,
    selections: Vec<MatchSelection>,
    additional_prize_tier: bool,
) -> Result<EncodedRequest, WagerError> {
    if stake == 0 {
        return Ok(EncodedRequest::Winshare(encode_winshare(game, selections)?));
    }
    if selections.is_empty() {
        return Err(WagerError::malformed("", "a board needs at least one match"));
    }
    let system_size = compute_system_size(&selections)?;
    let bet_type = classify_bet(game, system_size);
    let price = match game {
        Game::Sport => sport_price(stake, system_size, additional_prize_tier)?,
        Game::Multiscore => multiscore_price(stake, system_size)?,
    };
    Ok(EncodedRequest::Wager(WagerRequest {
        list_index,
        game_name: game,
        price,
        boards: vec![Board {
            bet_type,
            stake,
            selections,
        }],
    }))
}

/// Builds a stakeless winshare lookup for the given selections.
pub fn encode_winshare(
    game: Game,
    selections: Vec<MatchSelection>,
) -> Result<WinshareRequest, WagerError> {
    if selections.is_empty() {
        return Err(WagerError::malformed(
            "",
            "a winshare query needs at least one match",
        ));
    }
    Ok(WinshareRequest {
        additional_prize_tier: false,
        page: 0,
        page_size: 100,
        selections,
        game,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn sport_line(line: &str) -> Vec<MatchSelection> {
        parse_line(line, Game::Sport).unwrap()
    }
    fn multiscore_line(line: &str) -> Vec<MatchSelection> {
        parse_line(line, Game::Multiscore).unwrap()
    }
    fn encoded_wager(request: EncodedRequest) -> WagerRequest {
        match request {
            EncodedRequest::Wager(wager) => wager,
            EncodedRequest::Winshare(_) => panic!("expected a wager request"),
        }
    }

    #[test]
    fn single_mark_tokens_are_regular() {
        for token in ["1", "x", "X", "2"] {
            let selections = vec![parse_selection(token, Game::Sport).unwrap()];
            assert_eq!(compute_system_size(&selections).unwrap(), 1);
            assert_eq!(classify_bet(Game::Sport, 1), "Regular");
        }
    }

    #[test]
    fn option_count_follows_the_distinct_marks() {
        assert_eq!(parse_selection("1X2", Game::Sport).unwrap().option_count(), 3);
        assert_eq!(parse_selection("12", Game::Sport).unwrap().option_count(), 2);
        assert_eq!(parse_selection("x", Game::Sport).unwrap().option_count(), 1);
        // repeated marks select the same outcome once
        assert_eq!(parse_selection("11x", Game::Sport).unwrap().option_count(), 2);
        assert_eq!(
            parse_selection("0,0-1", Game::Multiscore).unwrap().option_count(),
            1
        );
    }

    #[test]
    fn marks_keep_their_input_order() {
        let selection = parse_selection("2x1", Game::Sport).unwrap();
        assert_eq!(
            selection,
            MatchSelection::Outcomes {
                outcomes: vec![Outcome::Away, Outcome::Tie, Outcome::Home],
            }
        );
    }

    #[test]
    fn line_terminators_are_skipped() {
        assert_eq!(parse_selection("12\n", Game::Sport).unwrap().option_count(), 2);
        assert_eq!(parse_selection("2\r\n", Game::Sport).unwrap().option_count(), 1);
        assert_eq!(
            parse_selection("0,1-2\r\n", Game::Multiscore).unwrap(),
            MatchSelection::Scores {
                home: vec![0, 1],
                away: vec![2],
            }
        );
    }

    #[test]
    fn unknown_marks_are_rejected() {
        let err = parse_selection("1q2", Game::Sport).unwrap_err();
        assert!(matches!(err, WagerError::MalformedInput { .. }));
    }

    #[test]
    fn empty_tokens_are_rejected() {
        assert!(parse_selection("", Game::Sport).is_err());
        assert!(parse_selection("", Game::Multiscore).is_err());
        assert!(parse_line("1;;2", Game::Sport).is_err());
    }

    #[test]
    fn score_tokens_split_into_candidate_sets() {
        let selection = parse_selection("0,1-2,3,4", Game::Multiscore).unwrap();
        assert_eq!(
            selection,
            MatchSelection::Scores {
                home: vec![0, 1],
                away: vec![2, 3, 4],
            }
        );
        assert_eq!(selection.option_count(), 6);
    }

    #[test]
    fn score_tokens_need_exactly_one_separator() {
        assert!(parse_selection("0,1", Game::Multiscore).is_err());
        assert!(parse_selection("0-1-2", Game::Multiscore).is_err());
    }

    #[test]
    fn score_candidates_must_be_integers() {
        assert!(parse_selection("a-1", Game::Multiscore).is_err());
        assert!(parse_selection("1-", Game::Multiscore).is_err());
        assert!(parse_selection("1,-2", Game::Multiscore).is_err());
    }

    #[test]
    fn parse_errors_carry_the_whole_line() {
        let err = parse_line("1;q;2", Game::Sport).unwrap_err();
        match err {
            WagerError::MalformedInput { input, .. } => assert_eq!(input, "1;q;2"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn system_size_multiplies_option_counts() {
        assert_eq!(compute_system_size(&sport_line("1X2;12;X")).unwrap(), 6);
        // order of matches does not change the size
        assert_eq!(compute_system_size(&sport_line("X;12;1X2")).unwrap(), 6);
        assert_eq!(
            compute_system_size(&multiscore_line("0,1-2,3;2,3-4,5")).unwrap(),
            16
        );
    }

    #[test]
    fn system_size_overflow_is_detected() {
        // 64 matches with 4 combinations each would need 128 bits
        let selections: Vec<_> = (0..64)
            .map(|_| MatchSelection::Scores {
                home: vec![0, 1],
                away: vec![0, 1],
            })
            .collect();
        assert_eq!(compute_system_size(&selections), Err(WagerError::Overflow));
    }

    #[test]
    fn bet_types_follow_game_and_size() {
        assert_eq!(classify_bet(Game::Sport, 1), "Regular");
        assert_eq!(classify_bet(Game::Multiscore, 1), "Regular");
        assert_eq!(classify_bet(Game::Sport, 6), "FREE 6");
        assert_eq!(classify_bet(Game::Multiscore, 16), "FULL 16");
    }

    #[test]
    fn sport_price_is_the_unit_stake() {
        let selections = sport_line("2;1X2;X;1;X;2;X;1;X;2;1;12;X");
        assert_eq!(compute_system_size(&selections).unwrap(), 6);
        let request = encoded_wager(encode_wager(Game::Sport, 1, 25, selections, false).unwrap());
        assert_eq!(request.list_index, 1);
        assert_eq!(request.price, 25);
        assert_eq!(request.boards.len(), 1);
        assert_eq!(request.boards[0].bet_type, "FREE 6");
        assert_eq!(request.boards[0].stake, 25);
    }

    #[test]
    fn prize_tier_doubling_composes_with_the_system() {
        let single = encoded_wager(encode_wager(Game::Sport, 0, 25, sport_line("1;2;X"), true).unwrap());
        assert_eq!(single.price, 50);
        let system = encoded_wager(encode_wager(Game::Sport, 0, 25, sport_line("1X2;12"), true).unwrap());
        assert_eq!(system.price, 2 * 25 * 6);
        assert_eq!(system.boards[0].bet_type, "FREE 6");
    }

    #[test]
    fn multiscore_price_covers_every_combination() {
        let selections = multiscore_line("0,1-2,3;2,3-4,5");
        let request = encoded_wager(encode_wager(Game::Multiscore, 0, 20, selections, false).unwrap());
        assert_eq!(request.price, 320);
        assert_eq!(request.boards[0].bet_type, "FULL 16");
        assert_eq!(request.boards[0].stake, 20);
    }

    #[test]
    fn selections_survive_a_wire_round_trip() {
        let scores = multiscore_line("0,1-2,3;2,3-4,5");
        let request =
            encoded_wager(encode_wager(Game::Multiscore, 0, 20, scores.clone(), false).unwrap());
        let decoded: WagerRequest =
            serde_json::from_value(serde_json::to_value(&request).unwrap()).unwrap();
        assert_eq!(decoded.boards[0].selections, scores);

        let marks = sport_line("1X2;X;2");
        let request = encoded_wager(encode_wager(Game::Sport, 0, 10, marks.clone(), false).unwrap());
        let decoded: WagerRequest =
            serde_json::from_value(serde_json::to_value(&request).unwrap()).unwrap();
        assert_eq!(decoded.boards[0].selections, marks);
    }

    #[test]
    fn zero_stake_requests_winshares_instead() {
        let request = encode_wager(Game::Sport, 0, 0, sport_line("1;X"), false).unwrap();
        let EncodedRequest::Winshare(winshare) = request else {
            panic!("expected a winshare request");
        };
        let value = serde_json::to_value(&winshare).unwrap();
        assert!(value.get("price").is_none());
        assert!(value.get("boards").is_none());
        assert_eq!(value["page"], 0);
        assert_eq!(value["pageSize"], 100);
        assert_eq!(value["additionalPrizeTier"], false);
    }

    #[test]
    fn winshare_requests_carry_only_selections() {
        let request = encode_winshare(Game::Sport, sport_line("1X2;X")).unwrap();
        assert!(!request.additional_prize_tier);
        assert_eq!(request.page, 0);
        assert_eq!(request.page_size, 100);
        assert_eq!(request.selections, sport_line("1X2;X"));
    }

    #[test]
    fn empty_boards_are_rejected() {
        assert!(encode_wager(Game::Sport, 0, 10, vec![], false).is_err());
        assert!(encode_winshare(Game::Multiscore, vec![]).is_err());
    }

    #[test]
    fn wager_wire_format_matches_the_platform_contract() {
        let request = encoded_wager(encode_wager(Game::Sport, 2, 10, sport_line("1X;2"), false).unwrap());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "listIndex": 2,
                "gameName": "SPORT",
                "price": 10,
                "boards": [{
                    "betType": "FREE 2",
                    "stake": 10,
                    "selections": [
                        { "outcomes": ["home", "tie"] },
                        { "outcomes": ["away"] },
                    ],
                }],
            })
        );

        let request = encoded_wager(
            encode_wager(Game::Multiscore, 0, 20, multiscore_line("0-1;1,2-0"), false).unwrap(),
        );
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "listIndex": 0,
                "gameName": "MULTISCORE",
                "price": 40,
                "boards": [{
                    "betType": "FULL 2",
                    "stake": 20,
                    "selections": [
                        { "homeScores": [0], "awayScores": [1] },
                        { "homeScores": [1, 2], "awayScores": [0] },
                    ],
                }],
            })
        );
    }
}
