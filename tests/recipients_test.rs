//! Integration tests for recipient classification and rendering.

mod common;

use common::fixture_lines;
use patchmail::RecipientSet;
use patchmail::recipients::{
    KERNEL_LIST, NETDEV_LIST, NETDEV_MAINTAINER, render_recipients, strip_display_names,
};

#[test]
fn test_tun_maintainers() {
    let set = RecipientSet::from_lines(fixture_lines("maintainers/tun.txt"));

    assert_eq!(
        set.to,
        vec![
            "Willem de Bruijn <willemdebruijn.kernel@gmail.com>",
            "Jason Wang <jasowang@redhat.com>",
            "\"David S. Miller\" <davem@davemloft.net>",
            "Eric Dumazet <edumazet@google.com>",
        ]
    );
    // netdev is a list on the list domain, so the kernel list is not re-added
    assert_eq!(set.cc, vec![NETDEV_LIST]);
}

#[test]
fn test_tun_rendering() {
    let set = RecipientSet::from_lines(fixture_lines("maintainers/tun.txt"));
    assert_eq!(
        render_recipients(&set),
        "To: Willem de Bruijn <willemdebruijn.kernel@gmail.com>,\n    \
         Jason Wang <jasowang@redhat.com>,\n    \
         \"David S. Miller\" <davem@davemloft.net>,\n    \
         Eric Dumazet <edumazet@google.com>\n\
         Cc: netdev@vger.kernel.org\n"
    );
}

#[test]
fn test_kernel_list_goes_last_after_foreign_lists() {
    let set = RecipientSet::from_lines(fixture_lines("maintainers/arm.txt"));
    assert_eq!(set.to, vec!["Russell King <linux@armlinux.org.uk>"]);
    assert_eq!(
        set.cc,
        vec!["linux-arm-kernel@lists.infradead.org", KERNEL_LIST]
    );
}

#[test]
fn test_commit_signer_fallback() {
    let set = RecipientSet::from_lines(fixture_lines("maintainers/signers.txt"));
    assert_eq!(set.to, vec!["Joe Signer <joe@example.org>"]);
    assert_eq!(set.cc, vec!["linux-foo@lists.example.org"]);
}

#[test]
fn test_netdev_maintainer_beats_commit_signer() {
    let set = RecipientSet::from_lines(fixture_lines("maintainers/netdev_only.txt"));
    assert_eq!(set.to, vec![NETDEV_MAINTAINER]);
    assert_eq!(set.cc, vec![NETDEV_LIST]);
}

#[test]
fn test_lone_commit_signer() {
    let set = RecipientSet::from_lines(["A <a@x.com> (commit_signer:1/15=7%)"]);
    assert_eq!(set.to, vec!["A <a@x.com>"]);
    assert!(set.cc.is_empty());
}

#[test]
fn test_lists_only_rendered_under_to() {
    let set = RecipientSet::from_lines(["linux-foo@lists.example.org", "netdev@example.org"]);
    assert!(set.to.is_empty());
    assert_eq!(
        render_recipients(&set),
        "To: linux-foo@lists.example.org,\n    netdev@example.org\n"
    );
}

#[test]
fn test_rendering_never_drops_both_fields() {
    let inputs: [&[&str]; 4] = [
        &["A <a@x.com>"],
        &["linux-kernel@vger.kernel.org"],
        &["x@lists.example.org (open list)"],
        &["B <b@y.org> (commit_signer:1/2=50%)"],
    ];
    for lines in inputs {
        let rendered = render_recipients(&RecipientSet::from_lines(lines));
        assert!(rendered.starts_with("To: "), "no To line for {:?}", lines);
    }
}

#[test]
fn test_degraded_rendering_of_real_block() {
    let rendered = render_recipients(&RecipientSet::from_lines(fixture_lines("maintainers/arm.txt")));
    let degraded = strip_display_names(&rendered);

    assert_eq!(
        degraded,
        "To: linux@armlinux.org.uk\n\
         Cc: linux-arm-kernel@lists.infradead.org,\n    linux-kernel@vger.kernel.org\n"
    );
    assert_eq!(strip_display_names(&degraded), degraded);
}

#[test]
fn test_degraded_rendering_is_idempotent() {
    for fixture in ["maintainers/tun.txt", "maintainers/signers.txt", "maintainers/netdev_only.txt"] {
        let rendered = render_recipients(&RecipientSet::from_lines(fixture_lines(fixture)));
        let once = strip_display_names(&rendered);
        assert_eq!(strip_display_names(&once), once, "fixture {}", fixture);
        assert!(!once.lines().next().unwrap_or("").contains('<'));
    }
}
