use std::collections::HashMap;

use crate::model::Socket;

/// `count` = total sockets; `links` = the size of the largest socket group
/// (sockets sharing a `group` value are linked together).
pub fn link_topology(sockets: &[Socket]) -> (u32, u32) {
    let count = sockets.len() as u32;

    let mut groups: HashMap<i32, u32> = HashMap::new();
    for socket in sockets {
        *groups.entry(socket.group).or_insert(0) += 1;
    }
    let links = groups.values().copied().max().unwrap_or(0);

    (count, links)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn socket(group: i32) -> Socket {
        Socket {
            group,
            attr: "S".to_string(),
            color: Some("R".to_string()),
        }
    }

    #[test]
    fn an_item_with_no_sockets_has_no_links() {
        assert_eq!(link_topology(&[]), (0, 0));
    }

    #[test]
    fn six_sockets_one_group_are_fully_linked() {
        let sockets: Vec<_> = (0..6).map(|_| socket(0)).collect();
        assert_eq!(link_topology(&sockets), (6, 6));
    }

    #[test]
    fn links_never_exceed_the_largest_group() {
        let sockets = vec![socket(0), socket(0), socket(1), socket(1), socket(1)];
        assert_eq!(link_topology(&sockets), (5, 3));
    }
}
