//! ペア決め（Secret Santa の割り当て）
//!
//! 参加者リストを一様ランダムに並べ替え、並び順で *i* 番目の参加者が
//! *(i+1) mod n* 番目の参加者にプレゼントを贈るように割り当てます。
//!
//! 結果は全員を含む長さ n の有向サイクルが 1 つだけになります。
//! n >= 2 なので自分自身に割り当てられることはありません。
//! 複数サイクルに分かれる割り当て（n >= 4 で可能な完全順列）は生成しません。

use std::collections::HashMap;

use rand::{Rng, seq::SliceRandom};

use super::{
    entity::Participant,
    error::PairingError,
    value_object::{DisplayName, UserId},
};

/// ペア決めに必要な最小人数
pub const MIN_PARTICIPANTS: usize = 2;

/// 1 人分の割り当て（giver が receiver にプレゼントを贈る）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub giver: UserId,
    pub receiver: Participant,
}

/// 参加者リストからサイクル状の割り当てを作成
///
/// 返り値はサイクルの順序に並んでいます（`i` 番目の receiver が `i+1` 番目の giver）。
pub fn pair<R: Rng + ?Sized>(
    participants: &[Participant],
    rng: &mut R,
) -> Result<Vec<Assignment>, PairingError> {
    if participants.len() < MIN_PARTICIPANTS {
        return Err(PairingError::InsufficientParticipants(participants.len()));
    }

    let mut order = participants.to_vec();
    order.shuffle(rng);

    let n = order.len();
    Ok((0..n)
        .map(|i| Assignment {
            giver: order[i].id.clone(),
            receiver: order[(i + 1) % n].clone(),
        })
        .collect())
}

/// giver ID → receiver の表示名 のマップに変換
pub fn assignments_by_giver(assignments: &[Assignment]) -> HashMap<UserId, DisplayName> {
    assignments
        .iter()
        .map(|a| (a.giver.clone(), a.receiver.name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn participants(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| {
                Participant::new(
                    UserId::new(format!("user-{i}")).unwrap(),
                    DisplayName::new(format!("Name {i}")).unwrap(),
                )
            })
            .collect()
    }

    /// giver から receiver を辿って一周したときに訪れた人数
    fn cycle_length(assignments: &[Assignment]) -> usize {
        let next: HashMap<&UserId, &UserId> = assignments
            .iter()
            .map(|a| (&a.giver, &a.receiver.id))
            .collect();
        let start = &assignments[0].giver;
        let mut current = start;
        let mut visited = 0;
        loop {
            current = next[current];
            visited += 1;
            if current == start || visited > assignments.len() {
                return visited;
            }
        }
    }

    #[test]
    fn test_pair_rejects_fewer_than_two_participants() {
        // テスト項目: 参加者が 2 人未満ならエラーになる
        // given (前提条件):
        let mut rng = StdRng::seed_from_u64(1);

        // when (操作) / then (期待する結果):
        assert_eq!(
            pair(&participants(0), &mut rng),
            Err(PairingError::InsufficientParticipants(0))
        );
        assert_eq!(
            pair(&participants(1), &mut rng),
            Err(PairingError::InsufficientParticipants(1))
        );
    }

    #[test]
    fn test_pair_two_participants_swap() {
        // テスト項目: 2 人の場合は互いに贈り合う割り当てしかない
        // given (前提条件):
        let input = participants(2);
        let mut rng = StdRng::seed_from_u64(42);

        // when (操作):
        let map = assignments_by_giver(&pair(&input, &mut rng).unwrap());

        // then (期待する結果):
        assert_eq!(map.len(), 2);
        assert_eq!(map[&input[0].id], input[1].name);
        assert_eq!(map[&input[1].id], input[0].name);
    }

    #[test]
    fn test_pair_distribution_is_consistent_with_uniform_permutation() {
        // テスト項目: 多数回の試行で、n=4 の 6 通りのサイクルがほぼ均等に出現する
        // given (前提条件):
        // n 人の単一サイクルは (n-1)! 通りあり、一様な並べ替えならそれぞれ等確率
        let input = participants(4);
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 12_000;
        let mut counts: HashMap<Vec<(UserId, UserId)>, usize> = HashMap::new();

        // when (操作):
        for _ in 0..trials {
            let mut edges: Vec<(UserId, UserId)> = pair(&input, &mut rng)
                .unwrap()
                .into_iter()
                .map(|a| (a.giver, a.receiver.id))
                .collect();
            edges.sort();
            *counts.entry(edges).or_default() += 1;
        }

        // then (期待する結果): 期待値 2000 に対して ±15% 以内
        assert_eq!(counts.len(), 6);
        for count in counts.values() {
            assert!((1_700..=2_300).contains(count), "count {count} out of range");
        }
    }

    proptest! {
        #[test]
        fn prop_pair_forms_single_cycle_without_self_assignment(n in 2usize..40, seed in any::<u64>()) {
            let input = participants(n);
            let mut rng = StdRng::seed_from_u64(seed);

            let assignments = pair(&input, &mut rng).unwrap();

            // 全員がちょうど 1 回ずつ贈る
            prop_assert_eq!(assignments.len(), n);
            let givers: HashSet<_> = assignments.iter().map(|a| a.giver.clone()).collect();
            prop_assert_eq!(givers.len(), n);

            // 全員がちょうど 1 回ずつ受け取る
            let receivers: HashSet<_> = assignments.iter().map(|a| a.receiver.id.clone()).collect();
            prop_assert_eq!(receivers.len(), n);

            let names: HashSet<_> = input.iter().map(|p| p.name.clone()).collect();
            for assignment in &assignments {
                prop_assert_ne!(&assignment.giver, &assignment.receiver.id);
                prop_assert!(names.contains(&assignment.receiver.name));
            }

            // 部分サイクルがない
            prop_assert_eq!(cycle_length(&assignments), n);
        }
    }
}
